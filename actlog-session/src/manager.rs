//! SessionManager: concurrent per-session access via DashMap.
//!
//! Each session lives behind its own async mutex. Holding a
//! [`SessionGuard`] for a whole turn makes overlapping requests on one
//! session run one after another while other sessions proceed freely.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::state::SessionState;

/// Exclusive access to one session for the duration of a turn.
pub type SessionGuard = OwnedMutexGuard<SessionState>;

/// Thread-safe session registry.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<DashMap<String, Arc<Mutex<SessionState>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Register a fresh session (replacing any existing one with this id)
    /// and return its id.
    pub fn create_session(&self, session_id: String) -> String {
        let state = SessionState::new(session_id.clone());
        self.sessions
            .insert(session_id.clone(), Arc::new(Mutex::new(state)));
        debug!(session_id = %session_id, "session created");
        session_id
    }

    /// Wait for exclusive access to a session, creating it on first use.
    ///
    /// A session torn down while this call waited is not handed out; the
    /// call retries against the registered one.
    pub async fn acquire(&self, session_id: &str) -> SessionGuard {
        loop {
            let slot = self.slot(session_id);
            let mut guard = Arc::clone(&slot).lock_owned().await;
            if self.is_registered(session_id, &slot) {
                guard.touch();
                return guard;
            }
            debug!(session_id, "session removed while waiting; retrying");
        }
    }

    fn is_registered(&self, session_id: &str, slot: &Arc<Mutex<SessionState>>) -> bool {
        self.sessions
            .get(session_id)
            .is_some_and(|current| Arc::ptr_eq(current.value(), slot))
    }

    /// Non-blocking variant of [`acquire`](Self::acquire) for an existing
    /// session. `None` when the session is unknown or mid-turn.
    pub fn try_acquire(&self, session_id: &str) -> Option<SessionGuard> {
        let slot = self.sessions.get(session_id).map(|r| Arc::clone(r.value()))?;
        slot.try_lock_owned().ok()
    }

    fn slot(&self, session_id: &str) -> Arc<Mutex<SessionState>> {
        if let Some(existing) = self.sessions.get(session_id) {
            return Arc::clone(existing.value());
        }
        let entry = self.sessions.entry(session_id.to_string()).or_insert_with(|| {
            debug!(session_id, "session created on first turn");
            Arc::new(Mutex::new(SessionState::new(session_id.to_string())))
        });
        Arc::clone(entry.value())
    }

    /// Snapshot of a session's state. Waits for any turn in progress.
    pub async fn snapshot(&self, session_id: &str) -> Option<SessionState> {
        let slot = self.sessions.get(session_id).map(|r| Arc::clone(r.value()))?;
        let guard = slot.lock().await;
        Some(guard.clone())
    }

    /// Tear a session down. Its cache goes with it.
    pub fn remove_session(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            debug!(session_id, "session removed");
        }
        removed
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    /// Remove `session_id` only if it still maps to `slot`.
    pub(crate) fn remove_slot(&self, session_id: &str, slot: &Arc<Mutex<SessionState>>) -> bool {
        let removed = self
            .sessions
            .remove_if(session_id, |_, current| Arc::ptr_eq(current, slot))
            .is_some();
        if removed {
            debug!(session_id, "session removed");
        }
        removed
    }

    pub(crate) fn slots(&self) -> Vec<(String, Arc<Mutex<SessionState>>)> {
        self.sessions
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
