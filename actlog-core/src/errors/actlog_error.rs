//! Top-level error aggregating every subsystem via `From` conversions.

use super::error_code::{self, ActlogErrorCode};
use super::{ConfigError, QueryError, RecordError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum ActlogError {
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] QueryError),

    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("no cached records for this session; retrieve records first")]
    NoCachedData,

    #[error("malformed record: {0}")]
    MalformedRecord(#[from] RecordError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type ActlogResult<T> = Result<T, ActlogError>;

impl ActlogErrorCode for ActlogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuery(e) => e.error_code(),
            Self::StoreUnavailable(e) => e.error_code(),
            Self::NoCachedData => error_code::NO_CACHED_DATA,
            Self::MalformedRecord(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}

impl ActlogError {
    /// Whether the caller can fix the request and retry (bad parameters, or
    /// analysis before retrieval).
    pub fn is_caller_correctable(&self) -> bool {
        matches!(self, Self::InvalidQuery(_) | Self::NoCachedData)
    }
}
