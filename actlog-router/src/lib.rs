//! # actlog-router
//!
//! Entry point for the language layer. Each turn carries a
//! [`StructuredRequest`]; the router decides whether it needs a fresh
//! retrieval or can be answered from the session's cached set, runs the
//! turn under the session's lock, and hands back a [`ToolResponse`].

pub mod decision;
pub mod request;
pub mod response;
pub mod router;

pub use decision::{decide, RouteDecision};
pub use request::StructuredRequest;
pub use response::{RouteOutcome, ToolResponse};
pub use router::Router;
