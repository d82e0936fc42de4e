//! Patient identifier: a UUID, always rendered lowercase-hyphenated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(Uuid);

impl PatientId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse any textual UUID form; the canonical rendering is used in keys.
    pub fn parse(value: &str) -> Result<Self, QueryError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| QueryError::InvalidPatientId {
                value: value.to_string(),
            })
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for PatientId {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
