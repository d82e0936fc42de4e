//! Record-store errors.

use super::error_code::{self, ActlogErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("range scan [{start_key}, {end_key}] failed: {reason}")]
    ScanFailed {
        start_key: String,
        end_key: String,
        reason: String,
    },

    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("store lock poisoned: {reason}")]
    LockPoisoned { reason: String },
}

impl ActlogErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        error_code::STORE_UNAVAILABLE
    }
}
