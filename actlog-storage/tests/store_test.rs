use actlog_core::config::StoreConfig;
use actlog_core::{ActivityRecord, IRecordStore, PatientId, RecordType};
use actlog_storage::{encode_range, encode_range_key, SqliteRecordStore};
use test_fixtures::{day_query, record, sample_day, DAY_START, OTHER_PATIENT, PATIENT};

fn store() -> SqliteRecordStore {
    SqliteRecordStore::open_in_memory(&StoreConfig::default()).unwrap()
}

fn patient() -> PatientId {
    PatientId::parse(PATIENT).unwrap()
}

#[test]
fn scan_returns_rows_in_key_order_within_inclusive_bounds() {
    let store = store();
    let records: Vec<ActivityRecord> = [10, 20, 30, 40]
        .iter()
        .map(|s| record("OS", "App Foregrounded", *s))
        .collect();
    store.put_records(&patient(), &records).unwrap();

    let start = encode_range_key(PATIENT, "UserActivityRecord", DAY_START + 20).unwrap();
    let end = encode_range_key(PATIENT, "UserActivityRecord", DAY_START + 40).unwrap();
    let rows = store.scan_range(&start, &end).unwrap();

    assert_eq!(rows.len(), 3, "both bounds are inclusive");
    assert_eq!(rows[0].key, start);
    assert_eq!(rows[2].key, end);
    assert!(rows.windows(2).all(|w| w[0].key < w[1].key));
}

#[test]
fn scan_returns_only_the_latest_cell_version() {
    let store = store();
    let key = encode_range_key(PATIENT, "UserActivityRecord", DAY_START).unwrap();
    store.put_cell(&key, "raw", "Raw", 1, b"old").unwrap();
    store.put_cell(&key, "raw", "Raw", 2, b"new").unwrap();

    let rows = store.scan_range(&key, &key).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payload, b"new");
}

#[test]
fn scan_ignores_other_columns() {
    let store = store();
    let key = encode_range_key(PATIENT, "UserActivityRecord", DAY_START).unwrap();
    store.put_cell(&key, "meta", "Raw", 9, b"metadata").unwrap();
    store.put_cell(&key, "raw", "Other", 9, b"other").unwrap();

    assert!(store.scan_range(&key, &key).unwrap().is_empty());
    assert_eq!(store.row_count().unwrap(), 0);
}

#[test]
fn scan_does_not_cross_patient_or_record_type_partitions() {
    let store = store();
    store.put_records(&patient(), &sample_day()).unwrap();

    let mut other = record("Battery", "Low Battery Warning", 100);
    store
        .put_records(&PatientId::parse(OTHER_PATIENT).unwrap(), &[other.clone()])
        .unwrap();
    other.record_type = RecordType::ErrorLogRecord;
    store.put_records(&patient(), &[other]).unwrap();

    let range = encode_range(&day_query("UserActivityRecord")).unwrap();
    let rows = store.scan_range(&range.start_key, &range.end_key).unwrap();
    assert_eq!(rows.len(), sample_day().len());
    for row in rows {
        let decoded: ActivityRecord = serde_json::from_slice(&row.payload).unwrap();
        assert_eq!(decoded.record_type, RecordType::UserActivityRecord);
    }
}

#[test]
fn empty_range_scans_to_nothing() {
    let store = store();
    store.put_records(&patient(), &sample_day()).unwrap();
    let start = encode_range_key(PATIENT, "MeterRecord", DAY_START).unwrap();
    let end = encode_range_key(PATIENT, "MeterRecord", DAY_START + 86_399).unwrap();
    assert!(store.scan_range(&start, &end).unwrap().is_empty());
}

#[test]
fn file_backed_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("activity.db");
    let config = StoreConfig {
        db_path: Some(path.display().to_string()),
        ..StoreConfig::default()
    };

    {
        let store = SqliteRecordStore::from_config(&config).unwrap();
        store.put_records(&patient(), &sample_day()).unwrap();
        assert_eq!(store.db_path(), Some(path.as_path()));
    }

    let reopened = SqliteRecordStore::from_config(&config).unwrap();
    assert_eq!(reopened.row_count().unwrap(), sample_day().len());
}

#[test]
fn table_id_partitions_one_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.db");
    let a = SqliteRecordStore::open(&path, &StoreConfig::default()).unwrap();
    a.put_records(&patient(), &sample_day()).unwrap();
    drop(a);

    let other_table = StoreConfig {
        table_id: "phone_user_activity_staging".into(),
        ..StoreConfig::default()
    };
    let b = SqliteRecordStore::open(&path, &other_table).unwrap();
    assert_eq!(b.row_count().unwrap(), 0);
}

#[test]
fn records_sharing_a_second_collapse_to_the_last_one() {
    let store = store();
    let mut first = record("OS", "App Backgrounded", 500);
    let mut second = record("OS", "App Foregrounded", 500);
    first.recorded_system_time += chrono::Duration::milliseconds(100);
    second.recorded_system_time += chrono::Duration::milliseconds(900);
    let other = record("OS", "App Backgrounded", 501);

    let keys = store
        .put_records(&patient(), &[first, second.clone(), other])
        .unwrap();

    assert_eq!(keys.len(), 2);
    assert!(keys[0] < keys[1]);
    assert_eq!(store.row_count().unwrap(), 2);

    let rows = store.scan_range(&keys[0], &keys[0]).unwrap();
    let stored: ActivityRecord = serde_json::from_slice(&rows[0].payload).unwrap();
    assert_eq!(stored, second);
}
