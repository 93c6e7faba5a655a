//! Per-call enrichment scope.
//!
//! An [`EventScope`] is built for exactly one capture call and dropped when
//! that call returns, on every path.

pub mod enrichment;

pub use enrichment::*;
