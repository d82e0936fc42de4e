//! # actlog-analysis
//!
//! Derived answers over the records of a session's cached result set.
//! Every operation returns structured data; none of it is prose.

pub mod dedup;
pub mod engine;
pub mod filter;
pub mod spikes;
pub mod summary;

pub use dedup::deduplicate;
pub use engine::AnalysisEngine;
pub use filter::apply_filter;
pub use spikes::{detect_spikes, SpikeParams};
pub use summary::summarize;
