//! Error types for gigdesk

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gigdesk
#[derive(Debug, Error)]
pub enum GigDeskError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No exporter registered for the requested format
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// Export flow was driven out of order
    #[error("Invalid export transition: cannot {action} while {state}")]
    InvalidTransition { action: String, state: String },

    /// Session lacks the required role
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<GigDeskError>,
    },
}

impl GigDeskError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        GigDeskError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for GigDeskError {
    fn from(err: toml::de::Error) -> Self {
        GigDeskError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for GigDeskError {
    fn from(err: toml::ser::Error) -> Self {
        GigDeskError::Toml(err.to_string())
    }
}

/// Result type alias for gigdesk
pub type Result<T> = std::result::Result<T, GigDeskError>;
