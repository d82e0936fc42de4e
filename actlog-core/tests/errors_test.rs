use actlog_core::errors::*;

#[test]
fn reversed_window_carries_both_times() {
    let err = QueryError::ReversedWindow {
        start_time: 100,
        end_time: 50,
    };
    let msg = err.to_string();
    assert!(msg.contains("100"));
    assert!(msg.contains("50"));
}

#[test]
fn invalid_patient_id_carries_value() {
    let err = QueryError::InvalidPatientId {
        value: "patient-7".into(),
    };
    assert!(err.to_string().contains("patient-7"));
}

#[test]
fn record_error_exposes_row_key() {
    let err = RecordError::InvalidJson {
        key: "k#1".into(),
        reason: "eof".into(),
    };
    assert_eq!(err.key(), "k#1");
    assert_eq!(RecordError::InvalidUtf8 { key: "k#2".into() }.key(), "k#2");
}

// --- From impls and codes ---

#[test]
fn query_error_converts_to_invalid_query() {
    let err: ActlogError = QueryError::MissingParameter { name: "patient_id" }.into();
    assert!(matches!(err, ActlogError::InvalidQuery(_)));
    assert_eq!(err.error_code(), "INVALID_QUERY");
    assert!(err.is_caller_correctable());
}

#[test]
fn store_error_converts_to_store_unavailable() {
    let err: ActlogError = StoreError::Sqlite {
        message: "disk I/O error".into(),
    }
    .into();
    assert!(matches!(err, ActlogError::StoreUnavailable(_)));
    assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
    assert!(!err.is_caller_correctable());
}

#[test]
fn no_cached_data_has_its_own_code() {
    let err = ActlogError::NoCachedData;
    assert_eq!(err.error_code(), "NO_CACHED_DATA");
    assert!(err.is_caller_correctable());
}

#[test]
fn record_and_config_errors_map_to_codes() {
    let rec: ActlogError = RecordError::InvalidUtf8 { key: "k".into() }.into();
    assert_eq!(rec.error_code(), "MALFORMED_RECORD");
    let cfg: ActlogError = ConfigError::FileNotFound { path: "x".into() }.into();
    assert_eq!(cfg.error_code(), "CONFIG_ERROR");
}
