//! RetrievalEngine: scan, decode, replace.

use tracing::{debug, info, warn};

use actlog_core::errors::ActlogResult;
use actlog_core::models::RetrievalReport;
use actlog_core::{retrieval_span, CachedResultSet, IRecordStore, RangeQuery};
use actlog_session::SessionCache;
use actlog_storage::encode_range;

use crate::decode::decode_rows;

/// Fetches one query's records from a store into a session cache.
pub struct RetrievalEngine<'a> {
    store: &'a dyn IRecordStore,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(store: &'a dyn IRecordStore) -> Self {
        Self { store }
    }

    /// Run `query` and make its records the session's cached set.
    ///
    /// The query is validated before any store access. A store failure
    /// leaves `cache` exactly as it was; malformed payloads are skipped
    /// and counted. An empty range is a successful, empty retrieval.
    pub fn retrieve(
        &self,
        query: &RangeQuery,
        cache: &mut SessionCache,
    ) -> ActlogResult<RetrievalReport> {
        let span = retrieval_span!(query);
        let _enter = span.enter();

        let range = encode_range(query)?;
        debug!(start_key = %range.start_key, end_key = %range.end_key, "scanning");

        let rows = self.store.scan_range(&range.start_key, &range.end_key)?;
        let decoded = decode_rows(&rows);

        for skipped in &decoded.skipped {
            warn!(row_key = skipped.key(), error = %skipped, "skipping malformed record");
        }

        let report = RetrievalReport {
            query: query.clone(),
            record_count: decoded.records.len(),
            malformed_count: decoded.skipped.len(),
            skipped: decoded.skipped,
        };

        let replaced = cache.replace(CachedResultSet::new(
            query.clone(),
            decoded.records,
            report.malformed_count,
        ));

        info!(
            records = report.record_count,
            malformed = report.malformed_count,
            replaced_previous = replaced.is_some(),
            "retrieval complete"
        );
        Ok(report)
    }
}
