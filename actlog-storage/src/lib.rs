//! # actlog-storage
//!
//! Row-key codec for `patientId#recordType#timestamp` keys and a SQLite
//! emulation of the wide-column activity table, scanned by key range.

pub mod codec;
pub mod engine;
pub mod migrations;
pub mod pragmas;

pub use codec::{decode_range_key, encode_key, encode_range, encode_range_key, KeyRange};
pub use engine::SqliteRecordStore;

use actlog_core::errors::StoreError;

/// Convert a rusqlite error message into a StoreError.
pub(crate) fn to_store_err(message: String) -> StoreError {
    StoreError::Sqlite { message }
}
