//! Report dataset module
//!
//! Rows fetched from the admin list endpoints are gathered into a
//! [`ReportDataset`] by the [`DatasetAssembler`], in fetch order, optionally
//! narrowed by a [`RecordFilter`].
//!
//! # Example
//!
//! ```ignore
//! use gd_core::report::{DatasetAssembler, RecordFilter};
//! use gd_core::types::ReportPeriod;
//!
//! let mut assembler = DatasetAssembler::new(ReportPeriod::Month)
//!     .with_filter(RecordFilter::new().status("active"));
//! assembler.add_page_str(&first_page_body)?;
//! assembler.add_page_str(&second_page_body)?;
//! let dataset = assembler.finish();
//! ```

mod assembler;
mod filter;
mod model;
mod validator;

pub use assembler::DatasetAssembler;
pub use filter::RecordFilter;
pub use model::{parse_joined, RecordBuilder, ReportDataset, ReportRecord, JOINED_DATE_FORMAT};
pub use validator::{is_plausible_email, RecordValidator, MAX_RATING};
