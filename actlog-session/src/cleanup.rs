//! Idle-session teardown.

use chrono::{Duration, Utc};
use tracing::info;

use crate::manager::SessionManager;

/// Remove sessions whose last turn started more than `max_idle` ago.
///
/// Sessions with a turn in progress are never removed. Returns the
/// number of sessions torn down.
pub fn cleanup_idle_sessions(manager: &SessionManager, max_idle: Duration) -> usize {
    let now = Utc::now();
    let mut removed = 0;

    for (session_id, slot) in manager.slots() {
        let Ok(state) = slot.try_lock() else {
            continue;
        };
        // The guard is held across removal so no turn can start in between.
        if state.idle_for(now) > max_idle && manager.remove_slot(&session_id, &slot) {
            removed += 1;
        }
    }

    if removed > 0 {
        info!(removed, remaining = manager.session_count(), "idle sessions cleaned up");
    }
    removed
}
