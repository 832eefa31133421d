//! JSON exporter

use super::exporter::{ExportContext, Exporter};
use crate::error::Result;
use crate::report::{ReportDataset, ReportRecord};
use crate::types::{ExportFormat, ReportPeriod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON exporter with compact mode support
pub struct JsonExporter {
    /// Whether to use pretty-print formatting
    pretty: bool,
}

impl JsonExporter {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Exporter for JsonExporter {
    fn encode(&self, dataset: &ReportDataset, ctx: &ExportContext) -> Result<String> {
        let report = JsonReport::new(dataset, ctx);

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };

        Ok(json)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }
}

/// Exported document: the full record set plus export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub exported_at: DateTime<Utc>,
    pub period: ReportPeriod,
    pub total_records: usize,
    pub records: Vec<ReportRecord>,
}

impl JsonReport {
    pub fn new(dataset: &ReportDataset, ctx: &ExportContext) -> Self {
        Self {
            exported_at: ctx.exported_at,
            period: dataset.period,
            total_records: dataset.len(),
            records: dataset.records.clone(),
        }
    }
}
