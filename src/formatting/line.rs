//! Template-based line formatter.
//!
//! Templates use `%placeholder%` tokens:
//! `%datetime%`, `%channel%`, `%level_name%`, `%level%`, `%message%`,
//! `%context%`, `%extra%`, and single keys as `%context.KEY%` or
//! `%extra.KEY%`. Unknown tokens are left untouched.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::record::LogRecord;

use super::Formatter;

pub const DEFAULT_FORMAT: &str = "[%datetime%] %channel%.%level_name%: %message% %context% %extra%\n";
pub const MESSAGE_FORMAT: &str = "%channel%.%level_name%: %message% %context% %extra%";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"%([A-Za-z_]+(?:\.[A-Za-z0-9_\-]+)?)%").unwrap();
}

#[derive(Debug, Clone)]
pub struct LineFormatter {
    format: String,
    date_format: String,
    allow_inline_line_breaks: bool,
    ignore_empty_context_and_extra: bool,
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

impl LineFormatter {
    pub fn new(format: &str) -> Self {
        Self {
            format: format.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            allow_inline_line_breaks: false,
            ignore_empty_context_and_extra: false,
        }
    }

    /// Formatter for a record's `formatted` text: no timestamp, no trailing
    /// newline, empty context and extra omitted.
    pub fn message() -> Self {
        Self::new(MESSAGE_FORMAT).ignore_empty_context_and_extra(true)
    }

    pub fn date_format(mut self, date_format: &str) -> Self {
        self.date_format = date_format.to_string();
        self
    }

    pub fn allow_inline_line_breaks(mut self, allow: bool) -> Self {
        self.allow_inline_line_breaks = allow;
        self
    }

    pub fn ignore_empty_context_and_extra(mut self, ignore: bool) -> Self {
        self.ignore_empty_context_and_extra = ignore;
        self
    }

    fn replacement(&self, record: &LogRecord, token: &str) -> Option<String> {
        let value = match token {
            "datetime" => record
                .datetime
                .map(|dt| dt.format(&self.date_format).to_string())
                .unwrap_or_default(),
            "channel" => record.channel.clone(),
            "level_name" => record.level.name(),
            "level" => record.level.value().to_string(),
            "message" => record.message.clone(),
            "context" => self.render_bag(&record.context.to_value()),
            "extra" => self.render_bag(&Value::Object(record.extra.clone())),
            _ => {
                let (bag, key) = token.split_once('.')?;
                let value = match bag {
                    "context" => record.context.to_value().get(key).cloned(),
                    "extra" => record.extra.get(key).cloned(),
                    _ => return None,
                };
                value.map(|v| render_scalar(&v)).unwrap_or_default()
            }
        };
        Some(self.normalize_breaks(value))
    }

    fn render_bag(&self, bag: &Value) -> String {
        let empty = bag.as_object().map(Map::is_empty).unwrap_or(true);
        match (empty, self.ignore_empty_context_and_extra) {
            (true, true) => String::new(),
            (true, false) => "[]".to_string(),
            _ => bag.to_string(),
        }
    }

    fn normalize_breaks(&self, value: String) -> String {
        if self.allow_inline_line_breaks {
            value
        } else {
            value.replace("\r\n", " ").replace(['\r', '\n'], " ")
        }
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &LogRecord) -> String {
        let output = PLACEHOLDER.replace_all(&self.format, |caps: &Captures| {
            self.replacement(record, &caps[1])
                .unwrap_or_else(|| caps[0].to_string())
        });

        if !self.ignore_empty_context_and_extra {
            return output.into_owned();
        }

        let mut trimmed = output.trim_end().to_string();
        if output.ends_with('\n') {
            trimmed.push('\n');
        }
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Level, RecordContext};
    use chrono::{TimeZone, Utc};

    fn record() -> LogRecord {
        LogRecord::new(Level::Warning, "billing", "card declined")
            .with_datetime(Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap()))
    }

    #[test]
    fn test_default_format() {
        let line = LineFormatter::default().format(&record());
        assert_eq!(
            line,
            "[2024-03-01T12:30:05.000000+00:00] billing.WARNING: card declined [] []\n"
        );
    }

    #[test]
    fn test_context_and_extra_rendered_as_json() {
        let rec = record()
            .with_context(RecordContext::new().with_value("order", 42))
            .with_extra("host", "web-1");
        let line = LineFormatter::new("%message% %context% %extra%").format(&rec);
        assert_eq!(line, r#"card declined {"order":42} {"host":"web-1"}"#);
    }

    #[test]
    fn test_message_formatter_drops_empty_bags() {
        assert_eq!(LineFormatter::message().format(&record()), "billing.WARNING: card declined");
    }

    #[test]
    fn test_single_key_placeholders() {
        let rec = record()
            .with_context(RecordContext::new().with_value("order", "A-7"))
            .with_extra("host", "web-1");
        let line =
            LineFormatter::new("%context.order%@%extra.host%%extra.missing% %nope%").format(&rec);
        assert_eq!(line, "A-7@web-1 %nope%");
    }

    #[test]
    fn test_line_breaks() {
        let rec = LogRecord::new(Level::Error, "app", "first\nsecond");
        assert_eq!(LineFormatter::new("%message%").format(&rec), "first second");
        assert_eq!(
            LineFormatter::new("%message%")
                .allow_inline_line_breaks(true)
                .format(&rec),
            "first\nsecond"
        );
    }

    #[test]
    fn test_format_batch_concatenates() {
        let a = LogRecord::new(Level::Info, "app", "one");
        let b = LogRecord::new(Level::Error, "app", "two");
        let out = LineFormatter::new("%level_name% %message%\n").format_batch(&[a, b]);
        assert_eq!(out, "INFO one\nERROR two\n");
    }
}
