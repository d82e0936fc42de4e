//! Stable error codes handed to the response collaborator.

pub const INVALID_QUERY: &str = "INVALID_QUERY";
pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
pub const NO_CACHED_DATA: &str = "NO_CACHED_DATA";
pub const MALFORMED_RECORD: &str = "MALFORMED_RECORD";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

/// Maps an error to a stable, machine-readable code.
pub trait ActlogErrorCode {
    fn error_code(&self) -> &'static str;
}
