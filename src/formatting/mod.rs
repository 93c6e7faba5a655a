//! Record formatting.
//!
//! The forwarder uses one formatter to fill in each record's `formatted`
//! text and a second one to render a whole batch into the `logs` context
//! entry of the batch's representative record.

pub mod line;

pub use line::*;

use crate::record::LogRecord;

pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> String;

    fn format_batch(&self, records: &[LogRecord]) -> String {
        records.iter().map(|record| self.format(record)).collect()
    }
}

impl<F> Formatter for F
where
    F: Fn(&LogRecord) -> String + Send + Sync,
{
    fn format(&self, record: &LogRecord) -> String {
        self(record)
    }
}
