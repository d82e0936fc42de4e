//! SqliteRecordStore: a wide-column table emulated on SQLite.
//!
//! Cells are addressed by `(table, row key, family, qualifier, version)`.
//! A range scan returns, for every row in the key interval, the newest
//! version of the configured record column.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::debug;

use actlog_core::config::StoreConfig;
use actlog_core::errors::{ActlogResult, StoreError};
use actlog_core::{ActivityRecord, IRecordStore, PatientId, ScannedRow};

use crate::codec::encode_key;
use crate::migrations;
use crate::pragmas::apply_pragmas;
use crate::to_store_err;

const SCAN_SQL: &str = "
SELECT c.row_key, c.value
  FROM cells c
 WHERE c.table_id = ?1 AND c.family = ?2 AND c.qualifier = ?3
   AND c.row_key >= ?4 AND c.row_key <= ?5
   AND c.version = (
       SELECT MAX(v.version) FROM cells v
        WHERE v.table_id = c.table_id AND v.family = c.family
          AND v.qualifier = c.qualifier AND v.row_key = c.row_key)
 ORDER BY c.row_key ASC";

/// Range-scannable record store backed by one SQLite connection.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
    table_id: String,
    family: String,
    qualifier: String,
    db_path: Option<PathBuf>,
}

impl SqliteRecordStore {
    /// Open the store described by `config`: file-backed when `db_path` is
    /// set, in memory otherwise.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        match &config.db_path {
            Some(path) => Self::open(Path::new(path), config),
            None => Self::open_in_memory(config),
        }
    }

    /// Open (or create) a file-backed store.
    pub fn open(path: &Path, config: &StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|e| to_store_err(e.to_string()))?;
        Self::initialize(conn, config, Some(path.to_path_buf()))
    }

    /// Open an in-memory store.
    pub fn open_in_memory(config: &StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|e| to_store_err(e.to_string()))?;
        Self::initialize(conn, config, None)
    }

    fn initialize(
        conn: Connection,
        config: &StoreConfig,
        db_path: Option<PathBuf>,
    ) -> Result<Self, StoreError> {
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            table_id: config.table_id.clone(),
            family: config.column_family.clone(),
            qualifier: config.column_qualifier.clone(),
            db_path,
        })
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError>,
    {
        let mut guard = self.conn.lock().map_err(|e| StoreError::LockPoisoned {
            reason: e.to_string(),
        })?;
        f(&mut guard)
    }

    /// Write one cell version of this store's table.
    pub fn put_cell(
        &self,
        row_key: &str,
        family: &str,
        qualifier: &str,
        version: i64,
        value: &[u8],
    ) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO cells (table_id, row_key, family, qualifier, version, value)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![self.table_id, row_key, family, qualifier, version, value],
            )
            .map_err(|e| to_store_err(e.to_string()))?;
            Ok(())
        })
    }

    /// Write records for one patient into the record column, keyed by
    /// record type and system time.
    ///
    /// Row keys have one-second resolution: records sharing a record type
    /// and system-time second share a row, and the last of them in `records`
    /// is the one stored. Returns the distinct row keys written, in order of
    /// first appearance.
    pub fn put_records(
        &self,
        patient_id: &PatientId,
        records: &[ActivityRecord],
    ) -> ActlogResult<Vec<String>> {
        let mut rows: Vec<(String, Vec<u8>)> = Vec::with_capacity(records.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
        for record in records {
            let key = encode_key(
                patient_id,
                record.record_type,
                record.recorded_system_time.timestamp(),
            )?;
            let payload = serde_json::to_vec(record).map_err(|e| to_store_err(e.to_string()))?;
            match index.get(&key) {
                Some(&at) => rows[at].1 = payload,
                None => {
                    index.insert(key.clone(), rows.len());
                    rows.push((key, payload));
                }
            }
        }
        let collapsed = records.len() - rows.len();
        if collapsed > 0 {
            debug!(collapsed, "records sharing a row key; last write kept");
        }

        let version = Utc::now().timestamp_micros();
        self.with_conn(|conn| {
            let tx = conn.transaction().map_err(|e| to_store_err(e.to_string()))?;
            {
                let mut stmt = tx
                    .prepare_cached(
                        "INSERT OR REPLACE INTO cells
                         (table_id, row_key, family, qualifier, version, value)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    )
                    .map_err(|e| to_store_err(e.to_string()))?;
                for (key, payload) in &rows {
                    stmt.execute(params![
                        self.table_id,
                        key,
                        self.family,
                        self.qualifier,
                        version,
                        payload
                    ])
                    .map_err(|e| to_store_err(e.to_string()))?;
                }
            }
            tx.commit().map_err(|e| to_store_err(e.to_string()))
        })?;

        debug!(count = rows.len(), patient_id = %patient_id, "records written");
        Ok(rows.into_iter().map(|(key, _)| key).collect())
    }

    /// Number of distinct rows holding the record column.
    pub fn row_count(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(DISTINCT row_key) FROM cells
                  WHERE table_id = ?1 AND family = ?2 AND qualifier = ?3",
                params![self.table_id, self.family, self.qualifier],
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n as usize)
            .map_err(|e| to_store_err(e.to_string()))
        })
    }
}

impl IRecordStore for SqliteRecordStore {
    fn scan_range(&self, start_key: &str, end_key: &str) -> Result<Vec<ScannedRow>, StoreError> {
        let scan_failed = |reason: String| StoreError::ScanFailed {
            start_key: start_key.to_string(),
            end_key: end_key.to_string(),
            reason,
        };

        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare_cached(SCAN_SQL)
                .map_err(|e| scan_failed(e.to_string()))?;
            let rows = stmt
                .query_map(
                    params![self.table_id, self.family, self.qualifier, start_key, end_key],
                    |row| Ok(ScannedRow::new(row.get::<_, String>(0)?, row.get::<_, Vec<u8>>(1)?)),
                )
                .map_err(|e| scan_failed(e.to_string()))?;
            let rows = rows
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| scan_failed(e.to_string()))?;
            debug!(start_key, end_key, rows = rows.len(), "range scan complete");
            Ok(rows)
        })
    }
}
