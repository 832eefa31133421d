//! Column layout shared by the tabular exporters

use crate::report::ReportRecord;

/// Column headers, in output order
pub const COLUMNS: [&str; 8] = [
    "ID", "Name", "Email", "Role", "Status", "Joined", "Projects", "Rating",
];

/// One rendered cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    /// Free-text fields are wrapped in double quotes in delimited output
    pub quoted: bool,
}

impl Cell {
    fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }
}

/// Render a record into cells matching [`COLUMNS`]
pub fn cells(record: &ReportRecord) -> [Cell; 8] {
    [
        Cell::bare(record.id.to_string()),
        Cell::quoted(record.name.as_str()),
        Cell::quoted(record.email.as_str()),
        Cell::bare(record.role.label()),
        Cell::bare(record.status.as_str()),
        Cell::bare(record.joined_display()),
        Cell::bare(record.projects.to_string()),
        Cell::bare(record.rating.to_string()),
    ]
}
