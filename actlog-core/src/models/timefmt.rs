//! Serde helpers for the two timestamp shapes found in activity payloads.
//!
//! Payloads carry RFC 3339 strings, but older writers emit naive ISO-8601
//! values. Naive system times are UTC; naive display times are taken as
//! `+00:00`.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Parse an offset-aware timestamp, accepting naive values as UTC.
pub fn parse_offset(value: &str) -> Result<DateTime<FixedOffset>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt);
    }
    let utc = FixedOffset::east_opt(0).ok_or_else(|| "invalid zero offset".to_string())?;
    parse_naive(value)
        .and_then(|naive| utc.from_local_datetime(&naive).single())
        .ok_or_else(|| format!("unrecognized timestamp '{value}'"))
}

/// Parse a UTC timestamp, accepting any RFC 3339 offset or a naive value.
pub fn parse_utc(value: &str) -> Result<DateTime<Utc>, String> {
    parse_offset(value).map(|dt| dt.with_timezone(&Utc))
}

pub mod utc {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_utc(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod offset {
    use chrono::{DateTime, FixedOffset, SecondsFormat};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<FixedOffset>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<DateTime<FixedOffset>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_offset(&raw).map_err(serde::de::Error::custom)
    }
}
