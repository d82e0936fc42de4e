//! SessionCache: the single-slot result-set state machine.
//!
//! `Empty` at conversation start, `Populated` after the first successful
//! retrieval. Every later retrieval replaces the slot wholesale; nothing
//! moves a cache back to `Empty` except tearing the session down.

use actlog_core::errors::{ActlogError, ActlogResult};
use actlog_core::{CachedResultSet, RangeQuery};

/// Observable cache state, for logs and responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Populated,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionCache {
    #[default]
    Empty,
    Populated(CachedResultSet),
}

impl SessionCache {
    pub fn new() -> Self {
        Self::Empty
    }

    pub fn state(&self) -> CacheState {
        match self {
            Self::Empty => CacheState::Empty,
            Self::Populated(_) => CacheState::Populated,
        }
    }

    /// Replace the slot with a freshly retrieved set. Returns the previous
    /// set, if any.
    pub fn replace(&mut self, set: CachedResultSet) -> Option<CachedResultSet> {
        match std::mem::replace(self, Self::Populated(set)) {
            Self::Empty => None,
            Self::Populated(previous) => Some(previous),
        }
    }

    pub fn current(&self) -> Option<&CachedResultSet> {
        match self {
            Self::Empty => None,
            Self::Populated(set) => Some(set),
        }
    }

    /// The cached set, or `NoCachedData` when nothing was retrieved yet.
    pub fn require(&self) -> ActlogResult<&CachedResultSet> {
        self.current().ok_or(ActlogError::NoCachedData)
    }

    /// The query that produced the cached set.
    pub fn originating_query(&self) -> Option<&RangeQuery> {
        self.current().map(|set| &set.query)
    }

    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated(_))
    }
}
