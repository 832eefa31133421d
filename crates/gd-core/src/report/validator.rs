//! Record validation
//!
//! Shared checks for rows coming from the backend. Problems are reported,
//! never used to drop rows.

use super::model::ReportRecord;
use crate::error::{GigDeskError, Result};

/// Highest rating the marketplace hands out
pub const MAX_RATING: f64 = 5.0;

/// Validator for report records
pub struct RecordValidator {
    max_rating: f64,
}

impl RecordValidator {
    pub fn new() -> Self {
        Self {
            max_rating: MAX_RATING,
        }
    }

    /// Collect every problem found in a record
    pub fn issues(&self, record: &ReportRecord) -> Vec<String> {
        let mut issues = Vec::new();

        if record.name.trim().is_empty() {
            issues.push(format!("record {} has an empty name", record.id));
        }

        if !is_plausible_email(&record.email) {
            issues.push(format!(
                "record {} has a malformed email '{}'",
                record.id, record.email
            ));
        }

        if !(0.0..=self.max_rating).contains(&record.rating) {
            issues.push(format!(
                "record {} has rating {} outside 0..={}",
                record.id, record.rating, self.max_rating
            ));
        }

        issues
    }

    /// Fail on the first problem
    pub fn validate(&self, record: &ReportRecord) -> Result<()> {
        match self.issues(record).into_iter().next() {
            Some(issue) => Err(GigDeskError::Validation(issue)),
            None => Ok(()),
        }
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Same rule the sign-up forms apply: one `@` with text on both sides
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !email.contains(' ')
        }
        None => false,
    }
}
