//! Property tests for near-duplicate collapsing.

use proptest::prelude::*;

use actlog_analysis::deduplicate;
use test_fixtures::record;

const SUB_TYPES: [&str; 3] = ["App Foregrounded", "App Backgrounded", "Low Battery Warning"];

proptest! {
    #[test]
    fn prop_counts_are_conserved(
        events in prop::collection::vec((0usize..3, 0i64..20_000), 0..200),
        window in 1u64..600,
    ) {
        let records: Vec<_> = events
            .iter()
            .map(|(s, t)| record("OS", SUB_TYPES[*s], *t))
            .collect();
        let report = deduplicate(&records, window);
        let total: usize = report.groups.iter().map(|g| g.count).sum();
        prop_assert_eq!(total, records.len());
        prop_assert!(report.groups.len() <= records.len());
    }

    #[test]
    fn prop_groups_never_span_a_gap_larger_than_window_times_count(
        offsets in prop::collection::vec(0i64..5_000, 1..100),
        window in 1u64..300,
    ) {
        let records: Vec<_> = offsets.iter().map(|t| record("OS", "App Foregrounded", *t)).collect();
        for group in deduplicate(&records, window).groups {
            let spread = (group.last_display_time - group.first_display_time).num_seconds();
            prop_assert!(spread <= window as i64 * (group.count as i64 - 1));
        }
    }
}
