//! Error-tracking client interface.
//!
//! The client itself (transport, serialization) lives outside this crate.
//! This module defines what the forwarder needs from it:
//! - `tracker` - capture and breadcrumb operations
//! - `event` - the outbound event as seen by event processors
//! - `severity` - severities and the level mapping
//! - `breadcrumb` - breadcrumb payload

pub mod breadcrumb;
pub mod event;
pub mod severity;
pub mod tracker;

pub use breadcrumb::*;
pub use event::*;
pub use severity::*;
pub use tracker::*;
