//! Core type definitions for gigdesk

use crate::error::{GigDeskError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marketplace account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    Client,
    Freelancer,
}

impl Role {
    /// All roles in display order
    pub const ALL: [Role; 3] = [Role::Admin, Role::Client, Role::Freelancer];

    /// Display label, as shown in exported reports
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Client => "Client",
            Role::Freelancer => "Freelancer",
        }
    }
}

impl FromStr for Role {
    type Err = GigDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "client" => Ok(Role::Client),
            "freelancer" => Ok(Role::Freelancer),
            other => Err(GigDeskError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = GigDeskError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.label().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output encoding selected for one export action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// HTML document with a single table (opened in a browser, printed to PDF)
    Pdf,
    /// Tab-separated values with a UTF-8 byte-order mark
    Excel,
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON with export metadata
    Json,
}

impl ExportFormat {
    /// All formats, in the order offered to users
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Pdf,
        ExportFormat::Excel,
        ExportFormat::Csv,
        ExportFormat::Json,
    ];

    /// Tag used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// File extension of the emitted file
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "html",
            ExportFormat::Excel => "xls",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// MIME type of the emitted file
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "text/html",
            ExportFormat::Excel => "application/vnd.ms-excel",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = GigDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" => Ok(ExportFormat::Excel),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(GigDeskError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting period selected on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    All,
}

impl ReportPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Quarter => "quarter",
            ReportPeriod::Year => "year",
            ReportPeriod::All => "all",
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = GigDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(ReportPeriod::Week),
            "month" => Ok(ReportPeriod::Month),
            "quarter" => Ok(ReportPeriod::Quarter),
            "year" => Ok(ReportPeriod::Year),
            "all" => Ok(ReportPeriod::All),
            other => Err(GigDeskError::Validation(format!(
                "Unknown report period: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend record identifier
///
/// The backend returns numeric ids for some resources and opaque strings
/// for others; both are kept as-is and rendered bare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Numeric(u64),
    Text(String),
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId::Numeric(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("FREELANCER".parse::<Role>().unwrap(), Role::Freelancer);
        assert_eq!(" client ".parse::<Role>().unwrap(), Role::Client);
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_string(&Role::Freelancer).unwrap(), "\"Freelancer\"");
    }

    #[test]
    fn test_export_format_metadata() {
        assert_eq!(ExportFormat::Pdf.extension(), "html");
        assert_eq!(ExportFormat::Pdf.mime_type(), "text/html");
        assert_eq!(ExportFormat::Excel.extension(), "xls");
        assert_eq!(ExportFormat::Json.mime_type(), "application/json");
    }

    #[test]
    fn test_export_format_parse() {
        for format in ExportFormat::ALL {
            assert_eq!(format.as_str().parse::<ExportFormat>().unwrap(), format);
        }
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(GigDeskError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_report_period_default_and_display() {
        assert_eq!(ReportPeriod::default(), ReportPeriod::Month);
        assert_eq!(ReportPeriod::Quarter.to_string(), "quarter");
        assert_eq!("YEAR".parse::<ReportPeriod>().unwrap(), ReportPeriod::Year);
    }

    #[test]
    fn test_record_id_accepts_number_or_string() {
        let numeric: RecordId = serde_json::from_str("42").unwrap();
        let text: RecordId = serde_json::from_str("\"usr_9f\"").unwrap();
        assert_eq!(numeric, RecordId::Numeric(42));
        assert_eq!(text.to_string(), "usr_9f");
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "42");
    }
}
