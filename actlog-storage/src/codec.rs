//! Composite row keys: `patientId#recordType#timestamp`.
//!
//! Within one patient + record type partition, keys sort by timestamp
//! because the timestamp component is zero-padded to a fixed width. A time
//! window is therefore one contiguous key range.
//!
//! ```
//! use actlog_core::RangeQuery;
//! use actlog_storage::encode_range;
//!
//! let q = RangeQuery::new(
//!     "010ceb22-8933-4668-974b-0956fceb8644",
//!     "UserActivityRecord",
//!     1_746_141_133,
//!     1_746_141_134,
//! )
//! .unwrap();
//! let range = encode_range(&q).unwrap();
//! assert_eq!(
//!     range.start_key,
//!     "010ceb22-8933-4668-974b-0956fceb8644#UserActivityRecord#1746141133"
//! );
//! assert!(range.start_key <= range.end_key);
//! ```

use actlog_core::constants::{KEY_SEPARATOR, TIMESTAMP_KEY_WIDTH};
use actlog_core::errors::QueryError;
use actlog_core::models::range_query::check_timestamp;
use actlog_core::{PatientId, RangeQuery, RecordType};

/// Inclusive row-key interval for one range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    pub start_key: String,
    pub end_key: String,
}

/// Encode a key from already-validated parts.
pub fn encode_key(
    patient_id: &PatientId,
    record_type: RecordType,
    timestamp: i64,
) -> Result<String, QueryError> {
    check_timestamp(timestamp)?;
    Ok(format!(
        "{patient_id}{sep}{record_type}{sep}{timestamp:0width$}",
        sep = KEY_SEPARATOR,
        width = TIMESTAMP_KEY_WIDTH,
    ))
}

/// Validate raw parts and encode a key.
pub fn encode_range_key(
    patient_id: &str,
    record_type: &str,
    timestamp: i64,
) -> Result<String, QueryError> {
    let patient_id = PatientId::parse(patient_id)?;
    let record_type: RecordType = record_type.parse()?;
    encode_key(&patient_id, record_type, timestamp)
}

/// Start and end keys covering a query's window, both inclusive.
pub fn encode_range(query: &RangeQuery) -> Result<KeyRange, QueryError> {
    query.validate()?;
    Ok(KeyRange {
        start_key: encode_key(&query.patient_id, query.record_type, query.start_time)?,
        end_key: encode_key(&query.patient_id, query.record_type, query.end_time)?,
    })
}

/// Split a row key back into its parts.
pub fn decode_range_key(key: &str) -> Result<(PatientId, RecordType, i64), QueryError> {
    let malformed = |reason: &str| QueryError::MalformedKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = key.split(KEY_SEPARATOR);
    let (Some(patient), Some(record_type), Some(timestamp), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed("expected three '#'-separated components"));
    };

    if timestamp.len() != TIMESTAMP_KEY_WIDTH || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("timestamp component is not fixed-width digits"));
    }
    let timestamp: i64 = timestamp
        .parse()
        .map_err(|_| malformed("timestamp component is not an integer"))?;

    Ok((PatientId::parse(patient)?, record_type.parse()?, timestamp))
}
