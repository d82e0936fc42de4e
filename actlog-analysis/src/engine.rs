//! AnalysisEngine: dispatches analysis requests over the cached set.

use tracing::{debug, info};

use actlog_core::config::{AnalysisConfig, CategoryConfig};
use actlog_core::errors::{ActlogResult, QueryError};
use actlog_core::models::{AnalysisKind, AnalysisOutcome, AnalysisRequest, RecordListing};
use actlog_core::{analysis_span, ActivityRecord, CachedResultSet};
use actlog_session::SessionCache;

use crate::dedup::deduplicate;
use crate::filter::apply_filter;
use crate::spikes::{detect_spikes, SpikeParams};
use crate::summary::summarize;

/// Read-only analysis over a session's cached records.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    categories: CategoryConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig, categories: CategoryConfig) -> Self {
        Self { config, categories }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn categories(&self) -> &CategoryConfig {
        &self.categories
    }

    /// Check that `request` can run: its filter is configured and its
    /// window, if overridden, is at least one second. Touches no data.
    pub fn check_request(&self, request: &AnalysisRequest) -> Result<(), QueryError> {
        if let Some(name) = request.filter.as_deref() {
            self.categories.filter(name)?;
        }
        if let AnalysisKind::DetectSpikes {
            window_secs: Some(0),
        } = request.kind
        {
            return Err(QueryError::ZeroAnalysisWindow);
        }
        Ok(())
    }

    /// Run `request` against the session's cached set.
    ///
    /// Fails with `NoCachedData` while the cache is empty. A populated
    /// cache holding zero records yields empty results.
    pub fn analyze(
        &self,
        cache: &SessionCache,
        request: &AnalysisRequest,
    ) -> ActlogResult<AnalysisOutcome> {
        let set = cache.require()?;
        self.analyze_set(set, request)
    }

    /// Run `request` against an explicit result set.
    pub fn analyze_set(
        &self,
        set: &CachedResultSet,
        request: &AnalysisRequest,
    ) -> ActlogResult<AnalysisOutcome> {
        let span = analysis_span!(request.kind, set.len());
        let _enter = span.enter();
        self.check_request(request)?;

        let records = apply_filter(&set.records, request.filter.as_deref(), &self.categories)?;
        if let Some(filter) = &request.filter {
            debug!(filter = %filter, kept = records.len(), "category filter applied");
        }

        let outcome = self.run(&records, set, &request.kind);
        info!(operation = operation_name(&request.kind), "analysis complete");
        Ok(outcome)
    }

    fn run(
        &self,
        records: &[ActivityRecord],
        set: &CachedResultSet,
        kind: &AnalysisKind,
    ) -> AnalysisOutcome {
        match kind {
            AnalysisKind::Summarize => AnalysisOutcome::Summary(summarize(records)),
            AnalysisKind::DetectSpikes { window_secs } => {
                let window_secs = window_secs.unwrap_or(self.config.spike_window_secs);
                let params = SpikeParams {
                    window_secs,
                    rate_multiplier: self.config.spike_rate_multiplier,
                    min_count: self.config.spike_min_count,
                };
                AnalysisOutcome::Spikes(detect_spikes(records, set.query.window_secs(), params))
            }
            AnalysisKind::ListRecords { dedup: true } => AnalysisOutcome::Deduplicated(
                deduplicate(records, self.config.dedup_window_secs),
            ),
            AnalysisKind::ListRecords { dedup: false } => {
                let mut records = records.to_vec();
                records.sort_by_key(|r| r.recorded_display_time);
                AnalysisOutcome::Records(RecordListing { records })
            }
        }
    }
}

fn operation_name(kind: &AnalysisKind) -> &'static str {
    match kind {
        AnalysisKind::Summarize => "summarize",
        AnalysisKind::DetectSpikes { .. } => "detect_spikes",
        AnalysisKind::ListRecords { .. } => "list_records",
    }
}
