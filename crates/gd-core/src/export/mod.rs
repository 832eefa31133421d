//! Report export functionality
//!
//! This module turns a [`ReportDataset`](crate::report::ReportDataset) into
//! an [`EncodedPayload`] in one of four formats:
//!
//! - JSON (records plus export metadata, pretty-printed)
//! - CSV (header plus one line per record)
//! - Excel (tab-separated, UTF-8 BOM)
//! - PDF (an HTML page with a single table)
//!
//! # Example
//!
//! ```ignore
//! use gd_core::export::ExportManager;
//! use gd_core::types::ExportFormat;
//!
//! let manager = ExportManager::new();
//! let payload = manager.export(&dataset, ExportFormat::Csv)?;
//! println!("{} ({} rows)", payload.filename, payload.rows);
//! ```

mod csv;
mod excel;
mod exporter;
mod filename;
mod html;
mod json;
mod payload;
mod tabular;

pub use self::csv::{CsvExporter, CsvQuoting};
pub use excel::{ExcelExporter, UTF8_BOM};
pub use exporter::{ExportContext, ExportManager, Exporter};
pub use filename::{build_filename, FilenameClock, DEFAULT_PREFIX};
pub use html::HtmlExporter;
pub use json::{JsonExporter, JsonReport};
pub use payload::EncodedPayload;
pub use tabular::COLUMNS;
