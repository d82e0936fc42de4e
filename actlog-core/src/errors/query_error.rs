//! Query validation errors. Raised before any storage access.

use super::error_code::{self, ActlogErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("start time {start_time} is after end time {end_time}")]
    ReversedWindow { start_time: i64, end_time: i64 },

    #[error("patient id '{value}' is not a valid UUID")]
    InvalidPatientId { value: String },

    #[error("unknown record type '{value}'")]
    UnknownRecordType { value: String },

    #[error("timestamp {value} is outside the key range 0..={max}")]
    TimestampOutOfRange { value: i64, max: i64 },

    #[error("missing retrieval parameter: {name}")]
    MissingParameter { name: &'static str },

    #[error("unknown category filter '{name}'")]
    UnknownFilter { name: String },

    #[error("analysis window must be at least one second")]
    ZeroAnalysisWindow,

    #[error("malformed row key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },
}

impl ActlogErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_QUERY
    }
}
