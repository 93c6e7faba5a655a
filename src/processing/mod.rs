//! Record processors.
//!
//! Processors run on every handled record before it is formatted, and on
//! every batch member before the batch is rendered.

pub mod uid;

pub use uid::*;

use crate::record::LogRecord;

pub trait Processor: Send + Sync {
    fn process(&self, record: LogRecord) -> LogRecord;
}

impl<F> Processor for F
where
    F: Fn(LogRecord) -> LogRecord + Send + Sync,
{
    fn process(&self, record: LogRecord) -> LogRecord {
        self(record)
    }
}
