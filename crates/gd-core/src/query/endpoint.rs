//! Backend endpoints consumed by the dashboards

use super::list::ListQuery;
use crate::error::{GigDeskError, Result};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        };
        f.write_str(name)
    }
}

/// Known backend endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Logout,
    AdminStats,
    AdminUsers,
    AdminProjects,
    AdminTransactions,
    FreelancerSettings,
    FreelancerProfile,
    FreelancerJobs,
    FreelancerProposals,
    FreelancerPortfolio,
    ClientDashboard,
    ClientJobs,
    ClientTalents,
    ClientWallet,
}

impl Endpoint {
    pub const ALL: [Endpoint; 15] = [
        Endpoint::Login,
        Endpoint::Logout,
        Endpoint::AdminStats,
        Endpoint::AdminUsers,
        Endpoint::AdminProjects,
        Endpoint::AdminTransactions,
        Endpoint::FreelancerSettings,
        Endpoint::FreelancerProfile,
        Endpoint::FreelancerJobs,
        Endpoint::FreelancerProposals,
        Endpoint::FreelancerPortfolio,
        Endpoint::ClientDashboard,
        Endpoint::ClientJobs,
        Endpoint::ClientTalents,
        Endpoint::ClientWallet,
    ];

    /// Short name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Logout => "logout",
            Endpoint::AdminStats => "admin-stats",
            Endpoint::AdminUsers => "admin-users",
            Endpoint::AdminProjects => "admin-projects",
            Endpoint::AdminTransactions => "admin-transactions",
            Endpoint::FreelancerSettings => "freelancer-settings",
            Endpoint::FreelancerProfile => "freelancer-profile",
            Endpoint::FreelancerJobs => "freelancer-jobs",
            Endpoint::FreelancerProposals => "freelancer-proposals",
            Endpoint::FreelancerPortfolio => "freelancer-portfolio",
            Endpoint::ClientDashboard => "client-dashboard",
            Endpoint::ClientJobs => "client-jobs",
            Endpoint::ClientTalents => "client-talents",
            Endpoint::ClientWallet => "client-wallet",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => "/auth/login",
            Endpoint::Logout => "/auth/logout",
            Endpoint::AdminStats => "/user/admin/stats",
            Endpoint::AdminUsers => "/user/admin/list-user",
            Endpoint::AdminProjects => "/user/admin/projects",
            Endpoint::AdminTransactions => "/user/admin/transactions",
            Endpoint::FreelancerSettings => "/user/freelancer/settings",
            Endpoint::FreelancerProfile => "/user/freelancer/profile",
            Endpoint::FreelancerJobs => "/user/freelancer/jobs",
            Endpoint::FreelancerProposals => "/user/freelancer/proposals",
            Endpoint::FreelancerPortfolio => "/user/freelancer/portfolio",
            Endpoint::ClientDashboard => "/user/client/dashboard",
            Endpoint::ClientJobs => "/user/client/jobs",
            Endpoint::ClientTalents => "/user/client/talents",
            Endpoint::ClientWallet => "/user/client/wallet",
        }
    }

    pub fn methods(&self) -> &'static [Method] {
        match self {
            Endpoint::Login | Endpoint::Logout | Endpoint::FreelancerProposals => &[Method::Post],
            Endpoint::FreelancerSettings => &[Method::Get, Method::Put, Method::Patch],
            Endpoint::ClientJobs | Endpoint::ClientWallet => &[Method::Get, Method::Post],
            _ => &[Method::Get],
        }
    }

    /// Whether the endpoint takes `page`/`limit`/`search`/`status`
    pub fn is_paginated(&self) -> bool {
        matches!(
            self,
            Endpoint::AdminUsers | Endpoint::AdminProjects | Endpoint::AdminTransactions
        )
    }

    /// Full request URL against a base such as `https://api.example.com/api`
    pub fn url(&self, base: &str, query: Option<&ListQuery>) -> Result<String> {
        let base = base.trim().trim_end_matches('/');
        Url::parse(base)
            .map_err(|e| GigDeskError::Config(format!("Invalid API base URL '{}': {}", base, e)))?;

        let mut url = format!("{}{}", base, self.path());
        if let Some(query) = query {
            if !self.is_paginated() {
                return Err(GigDeskError::Validation(format!(
                    "Endpoint {} does not take list query parameters",
                    self.name()
                )));
            }
            url.push('?');
            url.push_str(&query.to_query_string());
        }
        Ok(url)
    }
}

impl FromStr for Endpoint {
    type Err = GigDeskError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Endpoint::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| GigDeskError::Validation(format!("Unknown endpoint: {}", s)))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_users_url() {
        let query = ListQuery::new(3, 20).search("sari");
        let url = Endpoint::AdminUsers
            .url("https://api.example.com/api/", Some(&query))
            .unwrap();
        assert_eq!(
            url,
            "https://api.example.com/api/user/admin/list-user?page=3&limit=20&search=sari"
        );
    }

    #[test]
    fn test_url_without_query() {
        let url = Endpoint::Login.url("http://localhost:5000", None).unwrap();
        assert_eq!(url, "http://localhost:5000/auth/login");
    }

    #[test]
    fn test_query_on_non_list_endpoint() {
        let query = ListQuery::default();
        assert!(Endpoint::ClientWallet
            .url("http://localhost:5000", Some(&query))
            .is_err());
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            Endpoint::AdminStats.url("not a url", None),
            Err(GigDeskError::Config(_))
        ));
    }

    #[test]
    fn test_parse_names() {
        for endpoint in Endpoint::ALL {
            assert_eq!(endpoint.name().parse::<Endpoint>().unwrap(), endpoint);
        }
        assert!("admin-everything".parse::<Endpoint>().is_err());
    }

    #[test]
    fn test_methods() {
        assert_eq!(Endpoint::Login.methods(), &[Method::Post]);
        assert_eq!(Endpoint::FreelancerSettings.methods().len(), 3);
        assert_eq!(Endpoint::ClientWallet.methods()[1].to_string(), "POST");
    }
}
