//! # actlog-retrieval
//!
//! Turns a [`RangeQuery`](actlog_core::RangeQuery) into a populated
//! session cache: encode the key range, scan the store once, decode each
//! row, then swap the new set into the session's single slot.

pub mod decode;
pub mod engine;

pub use decode::{decode_row, decode_rows, DecodedRows};
pub use engine::RetrievalEngine;
