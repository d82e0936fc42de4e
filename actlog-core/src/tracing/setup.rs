//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the tracing subscriber.
///
/// Reads `ACTLOG_LOG` for per-crate levels, e.g.
/// `ACTLOG_LOG=actlog_retrieval=debug,actlog_router=info`. Falls back to the
/// configured `log_level`. Idempotent.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

        // A host that already installed a subscriber keeps it.
        let _ = if config.json_logs {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true),
                )
                .with(filter)
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
        };
    });
}

/// Initialize with an explicit filter string (tests, embedding hosts).
/// Uses `try_init` so a host that already installed a subscriber keeps it.
pub fn init_tracing_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .try_init();
}
