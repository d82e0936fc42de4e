//! Observability: `tracing` with `EnvFilter`, plus span helpers per operation.

pub mod setup;
pub mod spans;

pub use setup::{init_tracing, init_tracing_with_filter};
