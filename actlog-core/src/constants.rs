/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Separator between the components of a composite row key.
pub const KEY_SEPARATOR: char = '#';

/// Number of digits the timestamp component of a row key is padded to.
pub const TIMESTAMP_KEY_WIDTH: usize = 10;

/// Largest unix-second timestamp that fits in [`TIMESTAMP_KEY_WIDTH`] digits.
pub const MAX_KEY_TIMESTAMP: i64 = 9_999_999_999;

/// Environment variable read by [`crate::tracing::init_tracing`].
pub const LOG_ENV_VAR: &str = "ACTLOG_LOG";
