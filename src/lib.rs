//! Tracklog Core - log record forwarding to an error tracker
//!
//! This crate sits between an application's logging pipeline and an
//! error-tracking client. It filters records by level, collapses batches
//! into one event around their most severe record, and enriches each
//! outbound event with tags, extras, user, fingerprint, logger,
//! environment and release.
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `forwarder` - Main forwarding orchestrator (filtering, batching, enrichment)
//! - `record` - Log record model, levels and typed context
//! - `client` - Error-tracking client interface and severity mapping
//! - `scope` - Per-call enrichment scope
//! - `formatting` - Line formatter for records and batches
//! - `processing` - Record processors
//! - `bridge` - `log` facade integration
//! - `logging` - Structured diagnostic logging
//!
//! ## Example
//!
//! ```ignore
//! let mut forwarder = LogEventForwarder::new(client);
//! forwarder.set_level(Level::Warning);
//! forwarder.set_environment(Some("production"));
//!
//! LogBridge::new(forwarder)
//!     .with_env_logger_dest()
//!     .install(log::LevelFilter::Info)?;
//!
//! log::error!(target: "billing", "card declined");
//! ```

pub mod bridge;
pub mod client;
pub mod error;
pub mod formatting;
pub mod forwarder;
pub mod logging;
pub mod processing;
pub mod record;
pub mod scope;

#[cfg(test)]
mod testing;

pub use bridge::{BridgeHandle, LogBridge};
pub use client::{map_level, Breadcrumb, ErrorTracker, OutboundEvent, Severity};
pub use error::{ConfigError, ForwardError};
pub use formatting::{Formatter, LineFormatter};
pub use forwarder::{ForwarderConfig, LogEventForwarder, Propagation};
pub use processing::{Processor, UidProcessor};
pub use record::{ExceptionRef, Level, LogRecord, RecordContext};
pub use scope::EventScope;
