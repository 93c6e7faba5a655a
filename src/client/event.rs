//! Outbound event seam.
//!
//! Events are built by the client. The forwarder only sees them through
//! this trait, from inside an event processor.

use chrono::{DateTime, Utc};

pub trait OutboundEvent {
    fn logger(&self) -> Option<&str>;
    fn set_logger(&mut self, logger: &str);

    fn environment(&self) -> Option<&str>;
    fn set_environment(&mut self, environment: &str);

    fn release(&self) -> Option<&str>;
    fn set_release(&mut self, release: &str);

    fn timestamp(&self) -> Option<DateTime<Utc>>;
    fn set_timestamp(&mut self, timestamp: DateTime<Utc>);
}
