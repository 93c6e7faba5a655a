//! Forwarding of log records to the error tracker.
//!
//! - `handler` - the forwarder: filtering, batching, enrichment, capture
//! - `batch` - representative selection
//! - `config` - serde-loadable settings

pub mod batch;
pub mod config;
pub mod handler;

pub use batch::*;
pub use config::*;
pub use handler::*;
