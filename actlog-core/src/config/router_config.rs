use serde::{Deserialize, Serialize};

use crate::models::RecordType;

/// Routing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Record type used when a retrieval names none and nothing is cached.
    /// `None` makes the record type mandatory.
    pub default_record_type: Option<RecordType>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_record_type: Some(RecordType::UserActivityRecord),
        }
    }
}
