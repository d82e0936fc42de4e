//! Per-row decode failures. Collected and counted, never fatal to a scan.

use serde::Serialize;

use super::error_code::{self, ActlogErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum RecordError {
    #[error("row {key}: payload is not valid UTF-8")]
    InvalidUtf8 { key: String },

    #[error("row {key}: payload is not a valid activity record: {reason}")]
    InvalidJson { key: String, reason: String },
}

impl RecordError {
    /// Row key of the offending payload.
    pub fn key(&self) -> &str {
        match self {
            Self::InvalidUtf8 { key } | Self::InvalidJson { key, .. } => key,
        }
    }
}

impl ActlogErrorCode for RecordError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_RECORD
    }
}
