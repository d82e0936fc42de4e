//! RangeQuery: patient + record type + inclusive unix-second window.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_KEY_TIMESTAMP;
use crate::errors::QueryError;

use super::{PatientId, RecordType};

/// Parameters of one retrieval. Compared with `==` by the router to decide
/// whether the cached set is still the one the caller is asking about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeQuery {
    pub patient_id: PatientId,
    pub record_type: RecordType,
    /// Inclusive window start, unix seconds.
    pub start_time: i64,
    /// Inclusive window end, unix seconds.
    pub end_time: i64,
}

impl RangeQuery {
    /// Build a query from raw parameters, validating every field.
    pub fn new(
        patient_id: &str,
        record_type: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Self, QueryError> {
        let query = Self {
            patient_id: PatientId::parse(patient_id)?,
            record_type: record_type.parse()?,
            start_time,
            end_time,
        };
        query.validate()?;
        Ok(query)
    }

    /// Check timestamp bounds and window order.
    pub fn validate(&self) -> Result<(), QueryError> {
        check_timestamp(self.start_time)?;
        check_timestamp(self.end_time)?;
        if self.start_time > self.end_time {
            return Err(QueryError::ReversedWindow {
                start_time: self.start_time,
                end_time: self.end_time,
            });
        }
        Ok(())
    }

    /// Window length in seconds.
    pub fn window_secs(&self) -> i64 {
        self.end_time - self.start_time
    }
}

/// Timestamps must fit the fixed-width key component.
pub fn check_timestamp(value: i64) -> Result<(), QueryError> {
    if (0..=MAX_KEY_TIMESTAMP).contains(&value) {
        Ok(())
    } else {
        Err(QueryError::TimestampOutOfRange {
            value,
            max: MAX_KEY_TIMESTAMP,
        })
    }
}
