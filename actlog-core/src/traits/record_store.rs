use crate::errors::StoreError;

/// One row returned by a range scan: the row key and the latest value of the
/// record column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedRow {
    pub key: String,
    pub payload: Vec<u8>,
}

impl ScannedRow {
    pub fn new(key: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
        }
    }
}

/// Range-scannable wide-column store holding activity records.
///
/// Implementations own their retry policy; a returned error means the scan
/// could not be completed.
pub trait IRecordStore: Send + Sync {
    /// All rows with `start_key <= key <= end_key`, in ascending key order.
    fn scan_range(&self, start_key: &str, end_key: &str) -> Result<Vec<ScannedRow>, StoreError>;
}
