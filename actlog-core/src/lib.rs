//! # actlog-core
//!
//! Foundation crate for the activity-log router.
//! Defines the record model, range queries, cache/result models, the
//! record-store trait, errors, config, tracing setup, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;

// Re-export the most commonly used types at the crate root.
pub use config::ActlogConfig;
pub use errors::{ActlogError, ActlogErrorCode, ActlogResult};
pub use models::{ActivityRecord, CachedResultSet, PatientId, RangeQuery, RecordType, Stream};
pub use traits::{IRecordStore, ScannedRow};
