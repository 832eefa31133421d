//! Delimited (CSV) exporter

use super::exporter::{ExportContext, Exporter};
use super::tabular::{cells, COLUMNS};
use crate::error::{GigDeskError, Result};
use crate::report::ReportDataset;
use crate::types::ExportFormat;
use serde::{Deserialize, Serialize};

/// How free-text fields are quoted in delimited output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Wrap name and email in double quotes, escape nothing
    ///
    /// Matches the files the dashboards have always produced. A delimiter,
    /// quote or newline inside a value breaks the row.
    #[default]
    Naive,
    /// Quote only where needed and double embedded quotes (RFC 4180)
    Rfc4180,
}

/// CSV exporter
pub struct CsvExporter {
    quoting: CsvQuoting,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::with_quoting(CsvQuoting::Naive)
    }

    pub fn with_quoting(quoting: CsvQuoting) -> Self {
        Self { quoting }
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for CsvExporter {
    fn encode(&self, dataset: &ReportDataset, _ctx: &ExportContext) -> Result<String> {
        render_delimited(dataset, b',', self.quoting)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }
}

/// Header line plus one line per record, joined by `\n` without a trailing newline
pub(crate) fn render_delimited(
    dataset: &ReportDataset,
    delimiter: u8,
    quoting: CsvQuoting,
) -> Result<String> {
    match quoting {
        CsvQuoting::Naive => Ok(render_naive(dataset, char::from(delimiter))),
        CsvQuoting::Rfc4180 => render_rfc4180(dataset, delimiter),
    }
}

fn render_naive(dataset: &ReportDataset, delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut lines = Vec::with_capacity(dataset.len() + 1);
    lines.push(COLUMNS.join(&sep));

    for record in dataset.iter() {
        let row: Vec<String> = cells(record)
            .iter()
            .map(|cell| {
                if cell.quoted {
                    format!("\"{}\"", cell.text)
                } else {
                    cell.text.clone()
                }
            })
            .collect();
        lines.push(row.join(&sep));
    }

    lines.join("\n")
}

fn render_rfc4180(dataset: &ReportDataset, delimiter: u8) -> Result<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(::csv::QuoteStyle::Necessary)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    writer.write_record(COLUMNS)?;
    for record in dataset.iter() {
        writer.write_record(cells(record).iter().map(|c| c.text.as_str()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GigDeskError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| GigDeskError::Validation(format!("CSV output is not UTF-8: {}", e)))?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportRecord;
    use crate::types::{ReportPeriod, Role};
    use pretty_assertions::assert_eq;

    fn encode(records: Vec<ReportRecord>, quoting: CsvQuoting) -> String {
        let dataset = ReportDataset::new(ReportPeriod::Month, records);
        CsvExporter::with_quoting(quoting)
            .encode(&dataset, &ExportContext::now())
            .unwrap()
    }

    fn sample() -> ReportRecord {
        ReportRecord::builder(1u64, "A", "a@x.com")
            .role(Role::Freelancer)
            .status("active")
            .joined("2024-12-20")
            .projects(3)
            .rating(4.8)
            .build()
            .unwrap()
    }

    #[test]
    fn test_reference_row() {
        let csv = encode(vec![sample()], CsvQuoting::Naive);
        assert_eq!(
            csv,
            "ID,Name,Email,Role,Status,Joined,Projects,Rating\n1,\"A\",\"a@x.com\",Freelancer,active,2024-12-20,3,4.8"
        );
    }

    #[test]
    fn test_line_count_is_records_plus_header() {
        let records = (0..5).map(|_| sample()).collect();
        let csv = encode(records, CsvQuoting::Naive);
        assert_eq!(csv.lines().count(), 6);
    }

    #[test]
    fn test_empty_dataset_emits_header_only() {
        let csv = encode(vec![], CsvQuoting::Naive);
        assert_eq!(csv, "ID,Name,Email,Role,Status,Joined,Projects,Rating");
    }

    #[test]
    fn test_naive_mode_does_not_escape() {
        let record = ReportRecord::builder(2u64, "Doe, \"JD\"", "jd@x.com")
            .joined("2024-01-01")
            .build()
            .unwrap();
        let csv = encode(vec![record], CsvQuoting::Naive);
        assert!(csv.contains("\"Doe, \"JD\"\""));
    }

    #[test]
    fn test_rfc4180_mode_escapes() {
        let record = ReportRecord::builder(2u64, "Doe, \"JD\"", "jd@x.com")
            .joined("2024-01-01")
            .build()
            .unwrap();
        let csv = encode(vec![record], CsvQuoting::Rfc4180);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "2,\"Doe, \"\"JD\"\"\",jd@x.com,Freelancer,active,2024-01-01,0,0"
        );
    }
}
