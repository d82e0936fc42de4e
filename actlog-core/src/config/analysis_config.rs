use serde::{Deserialize, Serialize};

use super::defaults;

/// Analysis policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum gap (seconds) between consecutive records of one
    /// type/sub-type that still chains them into one dedup group.
    pub dedup_window_secs: u64,
    /// Sliding window (seconds) for spike detection.
    pub spike_window_secs: u64,
    /// A window is a spike when its count reaches this multiple of the
    /// sub-type's baseline count per window.
    pub spike_rate_multiplier: f64,
    /// Windows with fewer records are never spikes.
    pub spike_min_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dedup_window_secs: defaults::DEFAULT_DEDUP_WINDOW_SECS,
            spike_window_secs: defaults::DEFAULT_SPIKE_WINDOW_SECS,
            spike_rate_multiplier: defaults::DEFAULT_SPIKE_RATE_MULTIPLIER,
            spike_min_count: defaults::DEFAULT_SPIKE_MIN_COUNT,
        }
    }
}
