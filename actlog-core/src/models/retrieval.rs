use serde::{Deserialize, Serialize};

use crate::errors::RecordError;

use super::RangeQuery;

/// Outcome of one successful retrieval. The records themselves live in the
/// session cache; callers get counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalReport {
    pub query: RangeQuery,
    pub record_count: usize,
    pub malformed_count: usize,
    /// Row keys and reasons of skipped payloads.
    #[serde(skip_deserializing, default)]
    pub skipped: Vec<RecordError>,
}
