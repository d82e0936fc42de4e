//! Row payload decoding.

use actlog_core::errors::RecordError;
use actlog_core::{ActivityRecord, ScannedRow};

/// Decode one row's latest cell value: UTF-8 text holding one JSON record.
pub fn decode_row(row: &ScannedRow) -> Result<ActivityRecord, RecordError> {
    let text = std::str::from_utf8(&row.payload).map_err(|_| RecordError::InvalidUtf8 {
        key: row.key.clone(),
    })?;
    serde_json::from_str(text).map_err(|e| RecordError::InvalidJson {
        key: row.key.clone(),
        reason: e.to_string(),
    })
}

/// Records that decoded, plus the rows that did not.
#[derive(Debug, Default)]
pub struct DecodedRows {
    pub records: Vec<ActivityRecord>,
    pub skipped: Vec<RecordError>,
}

/// Decode every row, keeping scan order. Bad rows are collected rather
/// than failing the batch.
pub fn decode_rows(rows: &[ScannedRow]) -> DecodedRows {
    let mut out = DecodedRows {
        records: Vec::with_capacity(rows.len()),
        skipped: Vec::new(),
    };
    for row in rows {
        match decode_row(row) {
            Ok(record) => out.records.push(record),
            Err(err) => out.skipped.push(err),
        }
    }
    out
}
