//! Error handling for the activity-log router.
//! One error enum per subsystem, `thiserror` only.

pub mod actlog_error;
pub mod config_error;
pub mod error_code;
pub mod query_error;
pub mod record_error;
pub mod store_error;

pub use actlog_error::{ActlogError, ActlogResult};
pub use config_error::ConfigError;
pub use error_code::ActlogErrorCode;
pub use query_error::QueryError;
pub use record_error::RecordError;
pub use store_error::StoreError;
