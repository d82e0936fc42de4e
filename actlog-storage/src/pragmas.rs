//! PRAGMA configuration applied to every store connection.

use rusqlite::Connection;

use actlog_core::errors::StoreError;

use crate::to_store_err;

/// Apply performance and safety pragmas.
pub fn apply_pragmas(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA cache_size = -16000;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| to_store_err(e.to_string()))
}
