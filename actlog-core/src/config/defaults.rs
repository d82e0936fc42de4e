// Single source of truth for all default values.

// --- Store ---
pub const DEFAULT_TABLE_ID: &str = "phone_user_activity";
pub const DEFAULT_COLUMN_FAMILY: &str = "raw";
pub const DEFAULT_COLUMN_QUALIFIER: &str = "Raw";

// --- Analysis ---
pub const DEFAULT_DEDUP_WINDOW_SECS: u64 = 60;
pub const DEFAULT_SPIKE_WINDOW_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_SPIKE_RATE_MULTIPLIER: f64 = 3.0;
pub const DEFAULT_SPIKE_MIN_COUNT: usize = 5;

// --- Session ---
pub const DEFAULT_SESSION_MAX_IDLE_SECS: u64 = 3600; // 1 hour

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
