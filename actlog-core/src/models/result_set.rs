//! CachedResultSet: the records of the most recent retrieval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivityRecord, RangeQuery};

/// Records produced by one [`RangeQuery`], tagged with that query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResultSet {
    pub query: RangeQuery,
    pub records: Vec<ActivityRecord>,
    pub retrieved_at: DateTime<Utc>,
    /// Payloads skipped while decoding the scan.
    pub malformed_count: usize,
}

impl CachedResultSet {
    pub fn new(query: RangeQuery, records: Vec<ActivityRecord>, malformed_count: usize) -> Self {
        Self {
            query,
            records,
            retrieved_at: Utc::now(),
            malformed_count,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
