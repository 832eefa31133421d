//! Report row and dataset model

use crate::error::{GigDeskError, Result};
use crate::types::{RecordId, ReportPeriod, Role};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Date format used for the `joined` column
pub const JOINED_DATE_FORMAT: &str = "%Y-%m-%d";

/// A flat row of exportable user data
///
/// Field aliases cover the naming variants the backend list endpoints use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRecord {
    pub id: RecordId,
    #[serde(alias = "fullName", alias = "full_name", alias = "username")]
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(deserialize_with = "lowercase")]
    pub status: String,
    #[serde(
        alias = "joinedAt",
        alias = "createdAt",
        alias = "created_at",
        deserialize_with = "date_or_timestamp"
    )]
    pub joined: NaiveDate,
    #[serde(
        default,
        alias = "totalProjects",
        alias = "projectCount",
        deserialize_with = "null_as_default"
    )]
    pub projects: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
}

impl ReportRecord {
    /// Start building a record
    pub fn builder(
        id: impl Into<RecordId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> RecordBuilder {
        RecordBuilder::new(id, name, email)
    }

    /// Joined date as rendered in tabular exports
    pub fn joined_display(&self) -> String {
        self.joined.format(JOINED_DATE_FORMAT).to_string()
    }
}

/// Ordered collection of records for one export action
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportDataset {
    pub period: ReportPeriod,
    pub records: Vec<ReportRecord>,
}

impl ReportDataset {
    pub fn new(period: ReportPeriod, records: Vec<ReportRecord>) -> Self {
        Self { period, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportRecord> {
        self.records.iter()
    }
}

/// Builder for records assembled outside of backend payloads
pub struct RecordBuilder {
    id: RecordId,
    name: String,
    email: String,
    role: Role,
    status: String,
    joined: Option<String>,
    projects: u32,
    rating: f64,
}

impl RecordBuilder {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: Role::Freelancer,
            status: "active".to_string(),
            joined: None,
            projects: 0,
            rating: 0.0,
        }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Joined date as `YYYY-MM-DD` or an RFC 3339 timestamp
    pub fn joined(mut self, joined: impl Into<String>) -> Self {
        self.joined = Some(joined.into());
        self
    }

    pub fn projects(mut self, projects: u32) -> Self {
        self.projects = projects;
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Build the record
    pub fn build(self) -> Result<ReportRecord> {
        let joined = match self.joined {
            Some(raw) => parse_joined(&raw)?,
            None => Utc::now().date_naive(),
        };

        Ok(ReportRecord {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
            status: self.status.trim().to_lowercase(),
            joined,
            projects: self.projects,
            rating: self.rating,
        })
    }
}

/// Parse a joined date from either a plain date or a full timestamp
pub fn parse_joined(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, JOINED_DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| GigDeskError::Validation(format!("Invalid joined date: {}", raw)))
}

fn lowercase<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_lowercase())
}

fn date_or_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<NaiveDate, D::Error> {
    let value = String::deserialize(deserializer)?;
    parse_joined(&value).map_err(serde::de::Error::custom)
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
