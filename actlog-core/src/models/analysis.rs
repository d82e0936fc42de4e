//! Analysis requests and their structured outcomes.
//!
//! Outcomes are data, never prose; phrasing belongs to the response
//! collaborator.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use super::ActivityRecord;

/// What to compute over the cached records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    pub kind: AnalysisKind,
    /// Name of a configured category filter applied before the operation.
    pub filter: Option<String>,
}

impl AnalysisRequest {
    pub fn new(kind: AnalysisKind) -> Self {
        Self { kind, filter: None }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum AnalysisKind {
    #[default]
    Summarize,
    DetectSpikes {
        /// Overrides the configured sliding window.
        #[serde(default)]
        window_secs: Option<u64>,
    },
    ListRecords {
        /// Collapse near-duplicate records. On unless explicitly disabled.
        #[serde(default = "default_true")]
        dedup: bool,
    },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub activity_type: String,
    pub activity_sub_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTypeCount {
    pub activity_sub_type: String,
    pub count: usize,
}

/// Sub-type counts grouped under one activity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBreakdown {
    pub activity_type: String,
    pub count: usize,
    pub sub_types: Vec<SubTypeCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    /// One entry per `(activity_type, activity_sub_type)`, sorted by key.
    pub groups: Vec<GroupCount>,
    pub by_type: Vec<TypeBreakdown>,
    pub first_display_time: Option<DateTime<FixedOffset>>,
    pub last_display_time: Option<DateTime<FixedOffset>>,
}

/// A window where one sub-type's count far exceeds its baseline rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub activity_sub_type: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub record_count: usize,
    /// Baseline count expected in one window at the sub-type's overall rate.
    pub expected_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeReport {
    pub window_secs: u64,
    pub spikes: Vec<Spike>,
}

/// A run of near-duplicate records collapsed to one representative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupGroup {
    /// First record of the run in display-time order.
    pub representative: ActivityRecord,
    pub first_display_time: DateTime<FixedOffset>,
    pub last_display_time: DateTime<FixedOffset>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupReport {
    pub window_secs: u64,
    pub input_count: usize,
    pub groups: Vec<DedupGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordListing {
    pub records: Vec<ActivityRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Summary(Summary),
    Spikes(SpikeReport),
    Deduplicated(DedupReport),
    Records(RecordListing),
}
