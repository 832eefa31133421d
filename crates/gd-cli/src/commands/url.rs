//! Url command
//!
//! Print the request URL for a backend endpoint.

use anyhow::{anyhow, Result};
use clap::Args;
use gd_core::query::{Endpoint, ListQuery};

use super::AppContext;

/// Arguments for the url command
#[derive(Debug, Args)]
pub struct UrlArgs {
    /// Endpoint name, e.g. admin-users or login
    #[arg(required_unless_present = "list")]
    pub endpoint: Option<String>,

    /// API base URL [default: from config or environment]
    #[arg(long)]
    pub base: Option<String>,

    /// Page number (list endpoints only)
    #[arg(long)]
    pub page: Option<u32>,

    /// Page size (list endpoints only)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Search text (list endpoints only)
    #[arg(long)]
    pub search: Option<String>,

    /// Status filter (list endpoints only)
    #[arg(long)]
    pub status: Option<String>,

    /// List known endpoints instead
    #[arg(long, conflicts_with_all = ["page", "limit", "search", "status"])]
    pub list: bool,
}

impl UrlArgs {
    fn has_query(&self) -> bool {
        self.page.is_some() || self.limit.is_some() || self.search.is_some() || self.status.is_some()
    }

    fn query(&self, default_limit: u32) -> ListQuery {
        let mut query = ListQuery::new(self.page.unwrap_or(1), self.limit.unwrap_or(default_limit));
        if let Some(search) = &self.search {
            query = query.search(search.clone());
        }
        if let Some(status) = &self.status {
            query = query.status(status.clone());
        }
        query
    }
}

/// Execute the url command
pub fn execute(args: UrlArgs, ctx: &AppContext) -> Result<()> {
    if args.list {
        return list_endpoints();
    }

    let endpoint: Endpoint = args.endpoint.as_deref().unwrap_or_default().parse()?;
    let base = args
        .base
        .clone()
        .or_else(|| ctx.config.api.base_url.clone())
        .ok_or_else(|| {
            anyhow!("No API base URL configured. Set GIGDESK_API_URL or api.base_url, or pass --base")
        })?;

    // List endpoints always carry page and limit
    let query = (endpoint.is_paginated() || args.has_query())
        .then(|| args.query(ctx.config.search.page_size));

    let url = endpoint.url(&base, query.as_ref())?;
    let methods: Vec<String> = endpoint.methods().iter().map(|m| m.to_string()).collect();

    println!("{} {}", methods.join("|"), url);
    Ok(())
}

fn list_endpoints() -> Result<()> {
    use colored::Colorize;

    for endpoint in Endpoint::ALL {
        let methods: Vec<String> = endpoint.methods().iter().map(|m| m.to_string()).collect();
        println!(
            "  {:<22} {:<10} {}",
            endpoint.name().cyan(),
            methods.join("|"),
            endpoint.path().dimmed()
        );
    }
    Ok(())
}
