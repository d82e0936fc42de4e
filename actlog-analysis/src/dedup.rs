//! Near-duplicate collapsing for record listings.
//!
//! Devices often log the same event several times within seconds. Records
//! of one `(activity_type, activity_sub_type)` whose display times are at
//! most `window_secs` apart from the previous one chain into one group.

use std::collections::HashMap;

use actlog_core::models::{DedupGroup, DedupReport};
use actlog_core::ActivityRecord;

/// Collapse near-duplicates. Groups are ordered by their first record's
/// display time.
pub fn deduplicate(records: &[ActivityRecord], window_secs: u64) -> DedupReport {
    let mut sorted: Vec<&ActivityRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.recorded_display_time);

    let window_ms = i64::try_from(window_secs)
        .unwrap_or(i64::MAX)
        .saturating_mul(1000);
    let mut groups: Vec<DedupGroup> = Vec::new();
    // Index of the open group per key.
    let mut open: HashMap<(&str, &str), usize> = HashMap::new();

    for record in sorted {
        let at = record.recorded_display_time;
        if let Some(&idx) = open.get(&record.category_key()) {
            let group = &mut groups[idx];
            if (at - group.last_display_time).num_milliseconds() <= window_ms {
                group.last_display_time = at;
                group.count += 1;
                continue;
            }
        }
        open.insert(record.category_key(), groups.len());
        groups.push(DedupGroup {
            representative: record.clone(),
            first_display_time: at,
            last_display_time: at,
            count: 1,
        });
    }

    DedupReport {
        window_secs,
        input_count: records.len(),
        groups,
    }
}
