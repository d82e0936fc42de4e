//! ActivityRecord: one event from a patient's device log.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{timefmt, RecordType};

/// One logged event. Immutable once read from storage.
///
/// Field names on the wire follow the payloads written by the device
/// ingestion pipeline (`UseractivityType`, `RecordedDisplayTime`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(rename = "Stream")]
    pub stream: Stream,
    /// UTC representation of the recorded display time.
    #[serde(rename = "RecordedSystemTime", with = "timefmt::utc")]
    pub recorded_system_time: DateTime<Utc>,
    /// Device-local time of the event, offset-aware.
    #[serde(rename = "RecordedDisplayTime", with = "timefmt::offset")]
    pub recorded_display_time: DateTime<FixedOffset>,
    #[serde(rename = "UseractivityType")]
    pub activity_type: String,
    /// Sub-category; many sub-types map to one activity type.
    #[serde(rename = "UseractivitySubType")]
    pub activity_sub_type: String,
    /// Raw event payload, opaque to the router.
    #[serde(rename = "Data", default)]
    pub data: serde_json::Value,
    #[serde(rename = "TransmitterNumber", default)]
    pub transmitter_number: String,
    #[serde(rename = "RecordType")]
    pub record_type: RecordType,
}

impl ActivityRecord {
    /// Grouping key used by summaries and deduplication.
    pub fn category_key(&self) -> (&str, &str) {
        (&self.activity_type, &self.activity_sub_type)
    }
}

/// Device and operating-system identifier of the writer.
///
/// Writers emit either a name or a numeric code; values this crate does not
/// know are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stream {
    Ios,
    Android,
    Other(String),
}

impl Stream {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ios => "iOS",
            Self::Android => "Android",
            Self::Other(raw) => raw,
        }
    }

    fn from_raw(raw: String) -> Self {
        if raw.eq_ignore_ascii_case("ios") {
            Self::Ios
        } else if raw.eq_ignore_ascii_case("android") {
            Self::Android
        } else {
            Self::Other(raw)
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Stream {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Stream {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(d)? {
            serde_json::Value::String(raw) => Ok(Self::from_raw(raw)),
            serde_json::Value::Number(n) => Ok(Self::Other(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected stream name or code, found {other}"
            ))),
        }
    }
}
