//! Versioned schema migrations tracked through `PRAGMA user_version`.

mod v001_cells;
mod v002_row_index;

use rusqlite::Connection;

use actlog_core::errors::StoreError;

/// Latest schema version.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the database's `user_version`.
pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    let current_version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| StoreError::MigrationFailed {
            version: 0,
            message: e.to_string(),
        })?;

    let migrations: &[(&str, u32)] = &[
        (v001_cells::MIGRATION_SQL, 1),
        (v002_row_index::MIGRATION_SQL, 2),
    ];

    for (sql, version) in migrations {
        if current_version < *version {
            conn.execute_batch(sql)
                .map_err(|e| StoreError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| StoreError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            tracing::debug!(version, "applied store migration");
        }
    }
    Ok(())
}
