use serde::{Deserialize, Serialize};

use super::defaults;

/// Record-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite file backing the reference store. `None` keeps it in memory.
    pub db_path: Option<String>,
    /// Table holding activity rows.
    pub table_id: String,
    /// Column family of the record column.
    pub column_family: String,
    /// Qualifier of the record column; its latest cell is the JSON payload.
    pub column_qualifier: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            table_id: defaults::DEFAULT_TABLE_ID.to_string(),
            column_family: defaults::DEFAULT_COLUMN_FAMILY.to_string(),
            column_qualifier: defaults::DEFAULT_COLUMN_QUALIFIER.to_string(),
        }
    }
}
