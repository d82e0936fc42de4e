//! Burst detection per activity sub-type.
//!
//! Each sub-type's baseline is its average count per window over the
//! whole span being analyzed. A sliding window whose count reaches both
//! the absolute floor and `rate_multiplier` times that baseline is a
//! spike. Overlapping spike windows of one sub-type merge into one.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use actlog_core::models::{Spike, SpikeReport};
use actlog_core::ActivityRecord;

/// Thresholds for one detection run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeParams {
    pub window_secs: u64,
    pub rate_multiplier: f64,
    pub min_count: usize,
}

/// Find bursts in `records`. `span_secs` is the length of the period the
/// records were drawn from; `0` means "use the records' own span".
///
/// Spikes are ordered by sub-type, then start time.
pub fn detect_spikes(records: &[ActivityRecord], span_secs: i64, params: SpikeParams) -> SpikeReport {
    let window = i64::try_from(params.window_secs).unwrap_or(i64::MAX).max(1);

    let mut by_sub_type: BTreeMap<&str, Vec<DateTime<Utc>>> = BTreeMap::new();
    for record in records {
        by_sub_type
            .entry(record.activity_sub_type.as_str())
            .or_default()
            .push(record.recorded_system_time);
    }

    let mut spikes = Vec::new();
    for (sub_type, mut times) in by_sub_type {
        times.sort_unstable();
        let span = effective_span(&times, span_secs, window);
        let expected = times.len() as f64 * window as f64 / span as f64;
        let threshold = (params.rate_multiplier * expected).max(params.min_count as f64);

        for (lo, hi) in spike_runs(&times, window, threshold) {
            spikes.push(Spike {
                activity_sub_type: sub_type.to_string(),
                window_start: times[lo],
                window_end: times[hi],
                record_count: hi - lo + 1,
                expected_count: expected,
            });
        }
    }

    SpikeReport {
        window_secs: params.window_secs,
        spikes,
    }
}

fn effective_span(times: &[DateTime<Utc>], span_secs: i64, window: i64) -> i64 {
    let span = if span_secs > 0 {
        span_secs
    } else {
        match (times.first(), times.last()) {
            (Some(first), Some(last)) => (*last - *first).num_seconds(),
            _ => 0,
        }
    };
    span.max(window)
}

/// Index ranges `[lo, hi]` of merged spike windows over sorted `times`.
///
/// A window starts at each record and covers `[t, t + window)`.
fn spike_runs(times: &[DateTime<Utc>], window: i64, threshold: f64) -> Vec<(usize, usize)> {
    let window = chrono::Duration::seconds(window.min(i64::from(u32::MAX)));
    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut end = 0;

    for start in 0..times.len() {
        end = end.max(start);
        while end + 1 < times.len() && times[end + 1] - times[start] < window {
            end += 1;
        }
        let count = end - start + 1;
        if (count as f64) < threshold {
            continue;
        }
        match runs.last_mut() {
            Some((_, hi)) if start <= *hi => *hi = (*hi).max(end),
            _ => runs.push((start, end)),
        }
    }
    runs
}
