//! # actlog-session
//!
//! Per-conversation state: a single-slot result-set cache and a
//! concurrent registry that serializes turns within one session.

pub mod cache;
pub mod cleanup;
pub mod manager;
pub mod state;

pub use cache::{CacheState, SessionCache};
pub use cleanup::cleanup_idle_sessions;
pub use manager::{SessionGuard, SessionManager};
pub use state::SessionState;
