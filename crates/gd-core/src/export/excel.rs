//! Spreadsheet ("Excel") exporter
//!
//! Tab-separated rows behind a UTF-8 byte-order mark. Spreadsheet apps open
//! the `.xls` file directly and use the BOM to detect the encoding.

use super::csv::{render_delimited, CsvQuoting};
use super::exporter::{ExportContext, Exporter};
use crate::error::Result;
use crate::report::ReportDataset;
use crate::types::ExportFormat;

/// UTF-8 byte-order mark
pub const UTF8_BOM: char = '\u{FEFF}';

pub struct ExcelExporter {
    quoting: CsvQuoting,
}

impl ExcelExporter {
    pub fn new() -> Self {
        Self::with_quoting(CsvQuoting::Naive)
    }

    pub fn with_quoting(quoting: CsvQuoting) -> Self {
        Self { quoting }
    }
}

impl Default for ExcelExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for ExcelExporter {
    fn encode(&self, dataset: &ReportDataset, _ctx: &ExportContext) -> Result<String> {
        let body = render_delimited(dataset, b'\t', self.quoting)?;
        let mut out = String::with_capacity(body.len() + UTF8_BOM.len_utf8());
        out.push(UTF8_BOM);
        out.push_str(&body);
        Ok(out)
    }

    fn format(&self) -> ExportFormat {
        ExportFormat::Excel
    }
}
