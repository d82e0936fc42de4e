//! Counts by activity type and sub-type.

use std::collections::BTreeMap;

use actlog_core::models::{GroupCount, SubTypeCount, Summary, TypeBreakdown};
use actlog_core::ActivityRecord;

/// Group records by `(activity_type, activity_sub_type)`.
///
/// Groups come out sorted by key so equal inputs always give equal
/// summaries, regardless of record order.
pub fn summarize(records: &[ActivityRecord]) -> Summary {
    let mut by_key: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for record in records {
        *by_key.entry(record.category_key()).or_default() += 1;
    }

    let groups = by_key
        .iter()
        .map(|(&(activity_type, sub_type), &count)| GroupCount {
            activity_type: activity_type.to_string(),
            activity_sub_type: sub_type.to_string(),
            count,
        })
        .collect();

    // by_key is sorted by type first, so each type's sub-types are contiguous.
    let mut by_type: Vec<TypeBreakdown> = Vec::new();
    for (&(activity_type, sub_type), &count) in &by_key {
        let sub = SubTypeCount {
            activity_sub_type: sub_type.to_string(),
            count,
        };
        match by_type.last_mut() {
            Some(last) if last.activity_type == activity_type => {
                last.count += count;
                last.sub_types.push(sub);
            }
            _ => by_type.push(TypeBreakdown {
                activity_type: activity_type.to_string(),
                count,
                sub_types: vec![sub],
            }),
        }
    }

    Summary {
        total: records.len(),
        groups,
        by_type,
        first_display_time: records.iter().map(|r| r.recorded_display_time).min(),
        last_display_time: records.iter().map(|r| r.recorded_display_time).max(),
    }
}
