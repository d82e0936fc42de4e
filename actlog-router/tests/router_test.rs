use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actlog_core::config::StoreConfig;
use actlog_core::errors::{QueryError, StoreError};
use actlog_core::models::{AnalysisKind, AnalysisOutcome, AnalysisRequest};
use actlog_core::{ActlogConfig, ActlogError, IRecordStore, PatientId, ScannedRow};
use actlog_router::{Router, StructuredRequest, ToolResponse};
use actlog_storage::SqliteRecordStore;
use test_fixtures::{fixture_path, sample_day, DAY_END, DAY_START, PATIENT};

/// SQLite store that counts scans, can be switched to fail, and tracks
/// how many scans overlap.
struct ObservedStore {
    inner: SqliteRecordStore,
    scans: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    failing: AtomicBool,
    scan_delay: Duration,
}

impl ObservedStore {
    fn loaded(scan_delay: Duration) -> Arc<Self> {
        let inner = SqliteRecordStore::open_in_memory(&StoreConfig::default()).unwrap();
        inner
            .put_records(&PatientId::parse(PATIENT).unwrap(), &sample_day())
            .unwrap();
        Arc::new(Self {
            inner,
            scans: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            scan_delay,
        })
    }

    fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

impl IRecordStore for ObservedStore {
    fn scan_range(&self, start_key: &str, end_key: &str) -> Result<Vec<ScannedRow>, StoreError> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.scan_delay);
        let result = if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::ScanFailed {
                start_key: start_key.to_string(),
                end_key: end_key.to_string(),
                reason: "unavailable".to_string(),
            })
        } else {
            self.inner.scan_range(start_key, end_key)
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

fn router(store: &Arc<ObservedStore>) -> Router {
    actlog_core::tracing::init_tracing_with_filter("actlog_router=debug,actlog_retrieval=debug");
    let config = ActlogConfig::load(Some(fixture_path("config/categories.toml").as_path())).unwrap();
    Router::new(store.clone(), &config)
}

fn day_request() -> StructuredRequest {
    StructuredRequest::retrieval(PATIENT, "UserActivityRecord", DAY_START, DAY_END)
}

fn summary_total(outcome: &Option<AnalysisOutcome>) -> usize {
    match outcome {
        Some(AnalysisOutcome::Summary(s)) => s.total,
        other => panic!("expected summary, got {other:?}"),
    }
}

#[tokio::test]
async fn analysis_before_retrieval_fails_with_no_cached_data() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);

    let request = StructuredRequest::analysis(AnalysisRequest::default());
    let err = router.handle("s1", &request).await.unwrap_err();
    assert!(matches!(err, ActlogError::NoCachedData));

    let response = router.respond("s1", &request).await;
    assert_eq!(response.error_code(), Some("NO_CACHED_DATA"));
    assert!(matches!(response, ToolResponse::Failure { retryable: true, .. }));
    assert_eq!(store.scans(), 0);
}

#[tokio::test]
async fn retrieve_then_analyze_from_cache() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);

    let first = router.handle("s1", &day_request()).await.unwrap();
    assert_eq!(first.retrieval.as_ref().unwrap().record_count, 12);
    assert!(first.analysis.is_none());

    let follow_up = StructuredRequest::analysis(
        AnalysisRequest::new(AnalysisKind::Summarize).with_filter("transmitter"),
    );
    let second = router.handle("s1", &follow_up).await.unwrap();
    assert!(second.retrieval.is_none());
    assert_eq!(summary_total(&second.analysis), 5);
    assert_eq!(store.scans(), 1);
}

#[tokio::test]
async fn same_parameters_do_not_rescan() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);

    router.handle("s1", &day_request()).await.unwrap();
    let again = router
        .handle("s1", &day_request().then(AnalysisRequest::default()))
        .await
        .unwrap();

    assert!(again.retrieval.is_none());
    assert_eq!(summary_total(&again.analysis), 12);
    assert_eq!(store.scans(), 1);
}

#[tokio::test]
async fn new_window_reuses_cached_patient_and_type() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);
    router.handle("s1", &day_request()).await.unwrap();

    // Only the first two hours of the day.
    let narrower = StructuredRequest {
        end_time: Some(DAY_START + 7_199),
        ..StructuredRequest::default()
    }
    .then(AnalysisRequest::default());
    let outcome = router.handle("s1", &narrower).await.unwrap();

    let report = outcome.retrieval.unwrap();
    assert_eq!(report.query.start_time, DAY_START);
    assert_eq!(report.record_count, 4);
    assert_eq!(summary_total(&outcome.analysis), 4);
    assert_eq!(store.scans(), 2);
}

#[tokio::test]
async fn record_type_alias_phrase_resolves() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);

    let request = StructuredRequest::retrieval(PATIENT, "phone logs", DAY_START, DAY_END);
    let outcome = router.handle("s1", &request).await.unwrap();
    assert_eq!(outcome.retrieval.unwrap().record_count, 12);

    let unknown = StructuredRequest::retrieval(PATIENT, "sleep data", DAY_START, DAY_END);
    let err = router.handle("s1", &unknown).await.unwrap_err();
    assert!(matches!(
        err,
        ActlogError::InvalidQuery(QueryError::UnknownRecordType { .. })
    ));
    assert_eq!(store.scans(), 1);
}

#[tokio::test]
async fn invalid_requests_never_reach_the_store() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);

    let reversed = StructuredRequest::retrieval(PATIENT, "UserActivityRecord", 100, 50);
    let response = router.respond("s1", &reversed).await;
    assert_eq!(response.error_code(), Some("INVALID_QUERY"));

    let bad_filter =
        day_request().then(AnalysisRequest::default().with_filter("does-not-exist"));
    let err = router.handle("s1", &bad_filter).await.unwrap_err();
    assert!(matches!(
        err,
        ActlogError::InvalidQuery(QueryError::UnknownFilter { .. })
    ));
    assert_eq!(store.scans(), 0);
}

#[tokio::test]
async fn zero_spike_window_is_rejected_before_retrieval() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);

    let request = day_request().then(AnalysisRequest::new(AnalysisKind::DetectSpikes {
        window_secs: Some(0),
    }));
    let err = router.handle("s1", &request).await.unwrap_err();
    assert!(matches!(
        err,
        ActlogError::InvalidQuery(QueryError::ZeroAnalysisWindow)
    ));
    assert_eq!(store.scans(), 0);
    let state = router.sessions().snapshot("s1").await.unwrap();
    assert!(!state.cache.is_populated());

    // Same follow-up against an already populated cache leaves it alone.
    router.handle("s1", &day_request()).await.unwrap();
    let narrower = StructuredRequest {
        end_time: Some(DAY_START + 7_199),
        ..StructuredRequest::default()
    }
    .then(AnalysisRequest::new(AnalysisKind::DetectSpikes {
        window_secs: Some(0),
    }));
    let response = router.respond("s1", &narrower).await;
    assert_eq!(response.error_code(), Some("INVALID_QUERY"));
    assert_eq!(store.scans(), 1);
    let state = router.sessions().snapshot("s1").await.unwrap();
    let cached = state.cache.require().unwrap();
    assert_eq!(cached.query.end_time, DAY_END);
    assert_eq!(cached.len(), 12);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn slow_scan_does_not_starve_other_tasks() {
    let store = ObservedStore::loaded(Duration::from_millis(400));
    let router = Arc::new(router(&store));

    let slow = {
        let router = Arc::clone(&router);
        tokio::spawn(async move { router.handle("slow", &day_request()).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let quick = tokio::spawn(async {
        let started = std::time::Instant::now();
        tokio::time::sleep(Duration::from_millis(10)).await;
        started.elapsed()
    });
    let waited = quick.await.unwrap();

    assert!(waited < Duration::from_millis(300), "waited {waited:?}");
    assert!(!slow.is_finished());
    slow.await.unwrap().unwrap();
}

#[tokio::test]
async fn store_failure_keeps_previous_cache() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);
    router.handle("s1", &day_request()).await.unwrap();

    store.failing.store(true, Ordering::SeqCst);
    let other_day = StructuredRequest {
        start_time: Some(DAY_START + 86_400),
        end_time: Some(DAY_END + 86_400),
        ..StructuredRequest::default()
    };
    let response = router.respond("s1", &other_day).await;
    assert_eq!(response.error_code(), Some("STORE_UNAVAILABLE"));
    assert!(matches!(response, ToolResponse::Failure { retryable: false, .. }));

    let still_cached = router
        .handle("s1", &StructuredRequest::default())
        .await
        .unwrap();
    assert_eq!(summary_total(&still_cached.analysis), 12);
}

#[tokio::test]
async fn sessions_do_not_share_caches() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);
    router.handle("alice", &day_request()).await.unwrap();

    let err = router
        .handle("bob", &StructuredRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ActlogError::NoCachedData));
    assert_eq!(router.sessions().session_count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_turns_on_one_session_serialize() {
    let store = ObservedStore::loaded(Duration::from_millis(15));
    let router = Arc::new(router(&store));

    let mut handles = Vec::new();
    for i in 0..6 {
        let router = Arc::clone(&router);
        handles.push(tokio::spawn(async move {
            let request = StructuredRequest::retrieval(
                PATIENT,
                "UserActivityRecord",
                DAY_START,
                DAY_END - i * 60,
            );
            router.handle("shared", &request).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.scans(), 6);
    assert_eq!(store.max_in_flight.load(Ordering::SeqCst), 1);
    let state = router.sessions().snapshot("shared").await.unwrap();
    assert_eq!(state.turns, 6);
}

#[tokio::test]
async fn file_backed_router_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = ActlogConfig::default();
    config.store.db_path = Some(dir.path().join("actlog.db").display().to_string());

    let seed = SqliteRecordStore::from_config(&config.store).unwrap();
    seed.put_records(&PatientId::parse(PATIENT).unwrap(), &sample_day())
        .unwrap();
    drop(seed);

    let router = Router::open(&config).unwrap();
    let response = router
        .respond("s1", &day_request().then(AnalysisRequest::default()))
        .await;
    let ToolResponse::Success(outcome) = response else {
        panic!("expected success");
    };
    assert_eq!(summary_total(&outcome.analysis), 12);

    let json = serde_json::to_value(ToolResponse::Success(outcome)).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["analysis"]["kind"], "summary");
}

#[tokio::test]
async fn idle_sessions_are_cleaned_up() {
    let store = ObservedStore::loaded(Duration::ZERO);
    let router = router(&store);
    router.handle("old", &day_request()).await.unwrap();
    router.handle("new", &day_request()).await.unwrap();

    router.sessions().acquire("old").await.last_activity -= chrono::Duration::hours(3);

    assert_eq!(router.cleanup_idle(), 1);
    assert_eq!(router.sessions().session_ids(), vec!["new".to_string()]);
}
