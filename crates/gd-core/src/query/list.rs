//! Paginated list query parameters

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Default page size of the admin tables
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters shared by the paginated list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ListQuery {
    /// Create a query; page and limit are clamped to at least 1
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: None,
            status: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Same filters, different page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Encode as `page=..&limit=..[&search=..][&status=..]`
    ///
    /// Blank search and status values are left out, so the backend sees
    /// no filter at all.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("page", &self.page.to_string());
        serializer.append_pair("limit", &self.limit.to_string());

        if let Some(search) = non_blank(self.search.as_deref()) {
            serializer.append_pair("search", search);
        }
        if let Some(status) = non_blank(self.status.as_deref()) {
            serializer.append_pair("status", status);
        }

        serializer.finish()
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
