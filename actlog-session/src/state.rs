//! SessionState: everything one conversation owns.

use chrono::{DateTime, Utc};

use crate::cache::SessionCache;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub session_id: String,
    pub cache: SessionCache,
    pub created_at: DateTime<Utc>,
    /// Updated at the start of every turn.
    pub last_activity: DateTime<Utc>,
    /// Completed turns, successful or not.
    pub turns: u64,
}

impl SessionState {
    pub fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            cache: SessionCache::Empty,
            created_at: now,
            last_activity: now,
            turns: 0,
        }
    }

    /// Mark the start of a turn.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Mark the end of a turn.
    pub fn finish_turn(&mut self) {
        self.turns += 1;
    }

    /// Time since the last turn started.
    pub fn idle_for(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.last_activity)
    }
}
