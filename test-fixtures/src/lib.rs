//! Test fixture loader and builders shared by the workspace's tests.
//!
//! Provides typed deserialization of fixture files, synthetic activity
//! records, and record-store doubles.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::de::DeserializeOwned;

use actlog_core::errors::StoreError;
use actlog_core::{ActivityRecord, IRecordStore, RangeQuery, RecordType, ScannedRow, Stream};

/// Patient id used across fixtures.
pub const PATIENT: &str = "010ceb22-8933-4668-974b-0956fceb8644";

/// Second patient for isolation tests.
pub const OTHER_PATIENT: &str = "7d3f9a41-5be2-4c0e-9f6a-2a8c1e0b7d55";

/// 2025-05-01T00:00:00Z, the start of the fixture day.
pub const DAY_START: i64 = 1_746_057_600;

/// Last second of the fixture day.
pub const DAY_END: i64 = DAY_START + 86_399;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture_text(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", relative_path, e))
}

/// Read a fixture file as text.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// The sample day of user-activity records.
pub fn sample_day() -> Vec<ActivityRecord> {
    load_fixture("records/user_activity_day.json")
}

/// Fixture query covering the whole sample day.
pub fn day_query(record_type: &str) -> RangeQuery {
    RangeQuery::new(PATIENT, record_type, DAY_START, DAY_END)
        .unwrap_or_else(|e| panic!("fixture query invalid: {e}"))
}

/// A user-activity record `offset_secs` after [`DAY_START`], displayed in
/// UTC-7 like the devices in the sample data.
pub fn record(activity_type: &str, sub_type: &str, offset_secs: i64) -> ActivityRecord {
    let system: DateTime<Utc> = Utc
        .timestamp_opt(DAY_START + offset_secs, 0)
        .single()
        .unwrap_or_else(|| panic!("bad fixture offset {offset_secs}"));
    let local = FixedOffset::west_opt(7 * 3600).expect("valid offset");
    ActivityRecord {
        stream: Stream::Ios,
        recorded_system_time: system,
        recorded_display_time: system.with_timezone(&local),
        activity_type: activity_type.to_string(),
        activity_sub_type: sub_type.to_string(),
        data: serde_json::json!({ "offset": offset_secs }),
        transmitter_number: "8G1234".to_string(),
        record_type: RecordType::UserActivityRecord,
    }
}

/// `count` records of one sub-type spread evenly over `span_secs`,
/// starting `start_offset` seconds into the day.
pub fn burst(
    activity_type: &str,
    sub_type: &str,
    start_offset: i64,
    span_secs: i64,
    count: usize,
) -> Vec<ActivityRecord> {
    let step = if count > 1 {
        span_secs / (count as i64 - 1)
    } else {
        0
    };
    (0..count as i64)
        .map(|i| record(activity_type, sub_type, start_offset + i * step))
        .collect()
}

/// Store double that fails every scan and counts attempts.
#[derive(Default)]
pub struct FailingStore {
    pub scans: AtomicUsize,
}

impl IRecordStore for FailingStore {
    fn scan_range(&self, start_key: &str, end_key: &str) -> Result<Vec<ScannedRow>, StoreError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::ScanFailed {
            start_key: start_key.to_string(),
            end_key: end_key.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

/// Store double serving fixed rows and recording the requested ranges.
#[derive(Default)]
pub struct ScriptedStore {
    rows: Vec<ScannedRow>,
    pub requested: Mutex<Vec<(String, String)>>,
}

impl ScriptedStore {
    pub fn new(rows: Vec<ScannedRow>) -> Self {
        Self {
            rows,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn scan_count(&self) -> usize {
        self.requested.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl IRecordStore for ScriptedStore {
    fn scan_range(&self, start_key: &str, end_key: &str) -> Result<Vec<ScannedRow>, StoreError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push((start_key.to_string(), end_key.to_string()));
        }
        Ok(self
            .rows
            .iter()
            .filter(|r| r.key.as_str() >= start_key && r.key.as_str() <= end_key)
            .cloned()
            .collect())
    }
}
