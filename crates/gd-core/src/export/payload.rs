//! Encoded export payload

use crate::types::ExportFormat;

/// Encoded file content ready for an emitter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub filename: String,
    pub format: ExportFormat,
    /// Number of data rows (header excluded)
    pub rows: usize,
}

impl EncodedPayload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Content as text (all encoders produce UTF-8)
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}
