use serde::{Deserialize, Serialize};

use super::defaults;

/// Session lifecycle configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Sessions idle longer than this are torn down by cleanup.
    pub max_idle_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_idle_secs: defaults::DEFAULT_SESSION_MAX_IDLE_SECS,
        }
    }
}
