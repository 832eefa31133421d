//! Exporter trait and manager

use super::csv::{CsvExporter, CsvQuoting};
use super::excel::ExcelExporter;
use super::filename::{build_filename, FilenameClock, DEFAULT_PREFIX};
use super::html::HtmlExporter;
use super::json::JsonExporter;
use super::payload::EncodedPayload;
use crate::error::{GigDeskError, Result};
use crate::report::ReportDataset;
use crate::types::ExportFormat;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Per-export inputs that are not part of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportContext {
    /// Moment the export was requested
    pub exported_at: DateTime<Utc>,
}

impl ExportContext {
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(exported_at: DateTime<Utc>) -> Self {
        Self { exported_at }
    }

    /// Export moment as epoch milliseconds
    pub fn epoch_millis(&self) -> i64 {
        self.exported_at.timestamp_millis()
    }
}

/// Trait for dataset encoders
pub trait Exporter: Send + Sync {
    /// Encode a dataset to text
    fn encode(&self, dataset: &ReportDataset, ctx: &ExportContext) -> Result<String>;

    /// Format handled by this exporter
    fn format(&self) -> ExportFormat;

    /// Get the file extension
    fn file_extension(&self) -> &str {
        self.format().extension()
    }

    /// Get the MIME type
    fn mime_type(&self) -> &str {
        self.format().mime_type()
    }
}

/// Manager dispatching datasets to the exporter of the chosen format
pub struct ExportManager {
    exporters: HashMap<ExportFormat, Box<dyn Exporter>>,
    prefix: String,
    clock: FilenameClock,
}

impl ExportManager {
    /// Create a new export manager with default exporters
    pub fn new() -> Self {
        let mut manager = Self {
            exporters: HashMap::new(),
            prefix: DEFAULT_PREFIX.to_string(),
            clock: FilenameClock::new(),
        };

        manager.register(Box::new(JsonExporter::pretty()));
        manager.register(Box::new(CsvExporter::new()));
        manager.register(Box::new(ExcelExporter::new()));
        manager.register(Box::new(HtmlExporter::new()));

        manager
    }

    /// Set the filename prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Switch the delimited exporters to another quoting mode
    pub fn with_csv_quoting(mut self, quoting: CsvQuoting) -> Self {
        self.register(Box::new(CsvExporter::with_quoting(quoting)));
        self.register(Box::new(ExcelExporter::with_quoting(quoting)));
        self
    }

    /// Use compact JSON output
    pub fn with_compact_json(mut self, compact: bool) -> Self {
        let exporter = if compact {
            JsonExporter::compact()
        } else {
            JsonExporter::pretty()
        };
        self.register(Box::new(exporter));
        self
    }

    /// Register an exporter, replacing any for the same format
    pub fn register(&mut self, exporter: Box<dyn Exporter>) {
        self.exporters.insert(exporter.format(), exporter);
    }

    /// Encode a dataset without building a payload
    pub fn encode(
        &self,
        dataset: &ReportDataset,
        format: ExportFormat,
        ctx: &ExportContext,
    ) -> Result<String> {
        self.get(format)?.encode(dataset, ctx)
    }

    /// Encode a dataset into a payload stamped with a fresh, unique timestamp
    pub fn export(&self, dataset: &ReportDataset, format: ExportFormat) -> Result<EncodedPayload> {
        let ctx = ExportContext::at(self.clock.next_stamp());
        self.export_with_context(dataset, format, &ctx)
    }

    /// Encode a dataset into a payload for a given export moment
    pub fn export_with_context(
        &self,
        dataset: &ReportDataset,
        format: ExportFormat,
        ctx: &ExportContext,
    ) -> Result<EncodedPayload> {
        let exporter = self.get(format)?;
        let content = exporter.encode(dataset, ctx)?;
        let filename = build_filename(
            &self.prefix,
            dataset.period,
            ctx.epoch_millis(),
            exporter.file_extension(),
        );

        debug!(
            "Encoded {} rows as {} ({} bytes)",
            dataset.len(),
            format,
            content.len()
        );

        Ok(EncodedPayload {
            bytes: content.into_bytes(),
            mime_type: exporter.mime_type().to_string(),
            filename,
            format,
            rows: dataset.len(),
        })
    }

    /// Get list of available formats
    pub fn available_formats(&self) -> Vec<ExportFormat> {
        ExportFormat::ALL
            .into_iter()
            .filter(|f| self.exporters.contains_key(f))
            .collect()
    }

    /// Check if a format is available
    pub fn has_format(&self, format: ExportFormat) -> bool {
        self.exporters.contains_key(&format)
    }

    fn get(&self, format: ExportFormat) -> Result<&dyn Exporter> {
        self.exporters
            .get(&format)
            .map(|e| e.as_ref())
            .ok_or_else(|| GigDeskError::UnknownFormat(format.to_string()))
    }
}

impl Default for ExportManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportRecord;
    use crate::types::ReportPeriod;
    use chrono::TimeZone;

    fn dataset() -> ReportDataset {
        let records = (1..=3u64)
            .map(|i| {
                ReportRecord::builder(i, format!("User {}", i), format!("u{}@x.com", i))
                    .joined("2024-06-01")
                    .projects(i as u32)
                    .rating(4.0)
                    .build()
                    .unwrap()
            })
            .collect();
        ReportDataset::new(ReportPeriod::Month, records)
    }

    fn fixed_context() -> ExportContext {
        ExportContext::at(Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap())
    }

    struct PlainExporter;

    impl Exporter for PlainExporter {
        fn encode(&self, dataset: &ReportDataset, _ctx: &ExportContext) -> Result<String> {
            Ok(format!("{} rows", dataset.len()))
        }

        fn format(&self) -> ExportFormat {
            ExportFormat::Csv
        }
    }

    #[test]
    fn test_export_manager_creation() {
        let manager = ExportManager::new();
        for format in ExportFormat::ALL {
            assert!(manager.has_format(format));
        }
        assert_eq!(manager.available_formats(), ExportFormat::ALL.to_vec());
    }

    #[test]
    fn test_register_replaces_exporter() {
        let mut manager = ExportManager::new();
        manager.register(Box::new(PlainExporter));
        let out = manager
            .encode(&dataset(), ExportFormat::Csv, &fixed_context())
            .unwrap();
        assert_eq!(out, "3 rows");
    }

    #[test]
    fn test_unregistered_format() {
        let manager = ExportManager {
            exporters: HashMap::new(),
            prefix: DEFAULT_PREFIX.to_string(),
            clock: FilenameClock::new(),
        };
        let result = manager.export(&dataset(), ExportFormat::Json);
        assert!(matches!(result, Err(GigDeskError::UnknownFormat(_))));
    }

    #[test]
    fn test_payload_metadata() {
        let manager = ExportManager::new();
        let ctx = fixed_context();
        let payload = manager
            .export_with_context(&dataset(), ExportFormat::Excel, &ctx)
            .unwrap();

        assert_eq!(payload.rows, 3);
        assert_eq!(payload.mime_type, "application/vnd.ms-excel");
        assert_eq!(
            payload.filename,
            format!("admin-report-month-{}.xls", ctx.epoch_millis())
        );
    }

    #[test]
    fn test_custom_prefix() {
        let manager = ExportManager::new().with_prefix("tax-report");
        let payload = manager
            .export_with_context(&dataset(), ExportFormat::Json, &fixed_context())
            .unwrap();
        assert!(payload.filename.starts_with("tax-report-month-"));
        assert!(payload.filename.ends_with(".json"));
    }

    #[test]
    fn test_immediate_exports_have_distinct_filenames() {
        let manager = ExportManager::new();
        let data = dataset();
        let first = manager.export(&data, ExportFormat::Csv).unwrap();
        let second = manager.export(&data, ExportFormat::Csv).unwrap();
        assert_ne!(first.filename, second.filename);
    }

    #[test]
    fn test_encoding_is_deterministic_for_a_context() {
        let manager = ExportManager::new();
        let data = dataset();
        let ctx = fixed_context();
        for format in ExportFormat::ALL {
            let a = manager.export_with_context(&data, format, &ctx).unwrap();
            let b = manager.export_with_context(&data, format, &ctx).unwrap();
            assert_eq!(a.bytes, b.bytes, "format {}", format);
        }
    }

    #[test]
    fn test_payloads_differ_only_by_timestamp() {
        let manager = ExportManager::new();
        let data = dataset();
        let first = fixed_context();
        let later = ExportContext::at(first.exported_at + chrono::Duration::seconds(5));

        let csv_a = manager.encode(&data, ExportFormat::Csv, &first).unwrap();
        let csv_b = manager.encode(&data, ExportFormat::Csv, &later).unwrap();
        assert_eq!(csv_a, csv_b);

        let json_a: serde_json::Value =
            serde_json::from_str(&manager.encode(&data, ExportFormat::Json, &first).unwrap())
                .unwrap();
        let json_b: serde_json::Value =
            serde_json::from_str(&manager.encode(&data, ExportFormat::Json, &later).unwrap())
                .unwrap();
        assert_ne!(json_a["exportedAt"], json_b["exportedAt"]);
        assert_eq!(json_a["records"], json_b["records"]);
    }
}
