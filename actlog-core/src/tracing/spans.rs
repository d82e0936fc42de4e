//! Span definitions per operation: retrieval, analysis, routing.

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr) => {
        tracing::info_span!(
            "actlog.retrieval",
            patient_id = %$query.patient_id,
            record_type = %$query.record_type,
            start_time = $query.start_time,
            end_time = $query.end_time,
        )
    };
}

/// Create an analysis span.
#[macro_export]
macro_rules! analysis_span {
    ($kind:expr, $record_count:expr) => {
        tracing::info_span!("actlog.analysis", kind = ?$kind, record_count = $record_count)
    };
}

/// Create a routing span for one session turn.
#[macro_export]
macro_rules! route_span {
    ($session_id:expr) => {
        tracing::info_span!("actlog.route", session_id = %$session_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RETRIEVAL: &str = "actlog.retrieval";
    pub const ANALYSIS: &str = "actlog.analysis";
    pub const ROUTE: &str = "actlog.route";
}
