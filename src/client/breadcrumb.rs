//! Breadcrumbs passed through to the client.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ForwardError;
use crate::record::LogRecord;

use super::severity::{map_level, Severity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breadcrumb {
    pub timestamp: DateTime<Utc>,
    pub category: Option<String>,
    pub message: Option<String>,
    pub level: Severity,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl Breadcrumb {
    pub fn new(level: Severity, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            category: None,
            message: Some(message.to_string()),
            level,
            data: Map::new(),
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    /// Build a breadcrumb from a record: channel as category, top-level
    /// extra as data.
    pub fn from_record(record: &LogRecord) -> Result<Self, ForwardError> {
        Ok(Self {
            timestamp: record.datetime.unwrap_or_else(Utc::now),
            category: Some(record.channel.clone()),
            message: Some(record.message.clone()),
            level: map_level(record.level)?,
            data: record.extra.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;

    #[test]
    fn test_from_record() {
        let record = LogRecord::new(Level::Notice, "http", "GET /health").with_extra("status", 200);
        let crumb = Breadcrumb::from_record(&record).unwrap();

        assert_eq!(crumb.category.as_deref(), Some("http"));
        assert_eq!(crumb.message.as_deref(), Some("GET /health"));
        assert_eq!(crumb.level, Severity::Info);
        assert_eq!(crumb.data.get("status"), Some(&Value::from(200)));
    }

    #[test]
    fn test_from_record_custom_level() {
        let record = LogRecord::new(Level::Custom(1), "http", "odd");
        assert!(Breadcrumb::from_record(&record).is_err());
    }
}
