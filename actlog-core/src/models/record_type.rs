//! The fixed enumeration of record types stored per patient.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    UserActivityRecord,
    ErrorLogRecord,
    GlucoseRecord,
    MeterRecord,
}

impl RecordType {
    pub const ALL: [RecordType; 4] = [
        RecordType::UserActivityRecord,
        RecordType::ErrorLogRecord,
        RecordType::GlucoseRecord,
        RecordType::MeterRecord,
    ];

    /// Name as it appears in row keys and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserActivityRecord => "UserActivityRecord",
            Self::ErrorLogRecord => "ErrorLogRecord",
            Self::GlucoseRecord => "GlucoseRecord",
            Self::MeterRecord => "MeterRecord",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = QueryError;

    /// Exact, case-sensitive match: the name is a row-key component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| QueryError::UnknownRecordType {
                value: s.to_string(),
            })
    }
}
