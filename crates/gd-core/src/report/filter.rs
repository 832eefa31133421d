//! Local record filtering
//!
//! Mirrors the `search` / `status` query parameters of the admin list
//! endpoints so offline snapshots can be narrowed the same way.

use super::model::ReportRecord;
use crate::query::ListQuery;
use crate::types::Role;

/// Filter applied to assembled records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Case-insensitive substring matched against name and email
    pub search: Option<String>,
    /// Exact (case-insensitive) status
    pub status: Option<String>,
    pub role: Option<Role>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from the parameters of a list query
    pub fn from_query(query: &ListQuery) -> Self {
        Self {
            search: query.search.clone(),
            status: query.status.clone(),
            role: None,
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

    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Whether the filter lets every record through
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.status_term().is_none() && self.role.is_none()
    }

    /// Check a single record
    pub fn matches(&self, record: &ReportRecord) -> bool {
        if let Some(term) = self.search_term() {
            let hit = record.name.to_lowercase().contains(&term)
                || record.email.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }

        if let Some(status) = self.status_term() {
            if record.status != status {
                return false;
            }
        }

        if let Some(role) = self.role {
            if record.role != role {
                return false;
            }
        }

        true
    }

    /// Keep matching records, preserving order
    pub fn apply(&self, records: Vec<ReportRecord>) -> Vec<ReportRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    fn search_term(&self) -> Option<String> {
        normalized(self.search.as_deref())
    }

    fn status_term(&self) -> Option<String> {
        normalized(self.status.as_deref())
    }
}

// Blank filters behave like absent ones, as in the dashboards' "all" option.
fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty() && v != "all")
}
