//! Log record as produced by the logging pipeline.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::context::RecordContext;
use super::level::Level;

#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub channel: String,
    pub message: String,
    /// Rendered text, filled in by the record formatter.
    pub formatted: String,
    pub datetime: Option<DateTime<Utc>>,
    pub context: RecordContext,
    pub extra: Map<String, Value>,
}

impl LogRecord {
    pub fn new(level: Level, channel: &str, message: &str) -> Self {
        Self {
            level,
            channel: channel.to_string(),
            message: message.to_string(),
            formatted: String::new(),
            datetime: Some(Utc::now()),
            context: RecordContext::default(),
            extra: Map::new(),
        }
    }

    pub fn with_context(mut self, context: RecordContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn with_datetime(mut self, datetime: Option<DateTime<Utc>>) -> Self {
        self.datetime = datetime;
        self
    }

    pub fn has_exception(&self) -> bool {
        self.context.exception.is_some()
    }
}
