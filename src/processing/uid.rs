//! Adds a per-processor unique id to each record's extra bag.

use serde_json::Value;
use uuid::Uuid;

use crate::record::LogRecord;

use super::Processor;

const MIN_LENGTH: usize = 1;
const MAX_LENGTH: usize = 32;

/// Stamps `extra.uid` with an id generated once per processor, so records
/// from one request (or one batch) can be correlated.
#[derive(Debug, Clone)]
pub struct UidProcessor {
    uid: String,
}

impl UidProcessor {
    /// `length` is clamped to 1..=32 hex characters.
    pub fn new(length: usize) -> Self {
        let length = length.clamp(MIN_LENGTH, MAX_LENGTH);
        let uid = Uuid::new_v4().simple().to_string()[..length].to_string();
        Self { uid }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }
}

impl Default for UidProcessor {
    fn default() -> Self {
        Self::new(7)
    }
}

impl Processor for UidProcessor {
    fn process(&self, mut record: LogRecord) -> LogRecord {
        record
            .extra
            .insert("uid".to_string(), Value::String(self.uid.clone()));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;

    #[test]
    fn test_uid_is_stable_per_processor() {
        let processor = UidProcessor::default();
        assert_eq!(processor.uid().len(), 7);

        let a = processor.process(LogRecord::new(Level::Info, "app", "a"));
        let b = processor.process(LogRecord::new(Level::Info, "app", "b"));
        assert_eq!(a.extra.get("uid"), b.extra.get("uid"));
    }

    #[test]
    fn test_length_is_clamped() {
        assert_eq!(UidProcessor::new(0).uid().len(), 1);
        assert_eq!(UidProcessor::new(100).uid().len(), 32);
    }
}
