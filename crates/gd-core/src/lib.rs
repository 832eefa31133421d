//! gd-core - Core library for gigdesk
//!
//! This crate provides the platform-independent logic behind the
//! marketplace dashboards: report assembly, multi-format export, the export
//! dialog state machine, list queries with debounced search, and the
//! authenticated session.

pub mod auth;
pub mod config;
pub mod emit;
pub mod error;
pub mod export;
pub mod flow;
pub mod query;
pub mod report;
pub mod types;

pub use error::{GigDeskError, Result};
pub use types::*;
