//! Typed context bag carried by a log record.
//!
//! The well-known keys (`exception`, `extra`, `tags`, `fingerprint`, `user`,
//! `logger`) get their own fields so the forwarder can consume them one by
//! one; everything else lives in `rest`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

/// Shared handle to an error attached to a record.
pub type ExceptionRef = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Context key the batch path uses for rendered batch lines.
pub const LOGS_KEY: &str = "logs";

#[derive(Clone, Default)]
pub struct RecordContext {
    pub exception: Option<ExceptionRef>,
    pub extra: Map<String, Value>,
    pub tags: BTreeMap<String, String>,
    pub fingerprint: Option<Vec<String>>,
    pub user: Option<Value>,
    pub logger: Option<String>,
    pub rest: Map<String, Value>,
}

impl RecordContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exception<E>(mut self, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.exception = Some(Arc::new(err));
        self
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_fingerprint<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fingerprint = Some(parts.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_user(mut self, user: Value) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_logger(mut self, logger: &str) -> Self {
        self.logger = Some(logger.to_string());
        self
    }

    pub fn with_value(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.rest.insert(key.to_string(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exception.is_none()
            && self.extra.is_empty()
            && self.tags.is_empty()
            && self.fingerprint.is_none()
            && self.user.is_none()
            && self.logger.is_none()
            && self.rest.is_empty()
    }

    /// Render every present key as one JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(exception) = &self.exception {
            map.insert("exception".to_string(), Value::String(exception.to_string()));
        }
        if !self.extra.is_empty() {
            map.insert("extra".to_string(), Value::Object(self.extra.clone()));
        }
        if !self.tags.is_empty() {
            let tags = self
                .tags
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            map.insert("tags".to_string(), Value::Object(tags));
        }
        if let Some(fingerprint) = &self.fingerprint {
            map.insert(
                "fingerprint".to_string(),
                Value::Array(fingerprint.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(user) = &self.user {
            map.insert("user".to_string(), user.clone());
        }
        if let Some(logger) = &self.logger {
            map.insert("logger".to_string(), Value::String(logger.clone()));
        }
        for (key, value) in &self.rest {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }
}

impl fmt::Debug for RecordContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordContext")
            .field("exception", &self.exception.as_ref().map(|e| e.to_string()))
            .field("extra", &self.extra)
            .field("tags", &self.tags)
            .field("fingerprint", &self.fingerprint)
            .field("user", &self.user)
            .field("logger", &self.logger)
            .field("rest", &self.rest)
            .finish()
    }
}

/// Coerce an arbitrary `user` value into a key-value map.
///
/// Objects are kept, arrays are keyed by index, null becomes empty and any
/// other scalar is treated as the user id.
pub fn coerce_user(user: Value) -> Map<String, Value> {
    match user {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Null => Map::new(),
        scalar => {
            let mut map = Map::new();
            map.insert("id".to_string(), scalar);
            map
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;

    #[test]
    fn test_to_value_includes_known_and_rest() {
        let ctx = RecordContext::new()
            .with_tag("env", "x")
            .with_logger("payments")
            .with_value("order_id", 17);

        assert_eq!(
            ctx.to_value(),
            json!({"tags": {"env": "x"}, "logger": "payments", "order_id": 17})
        );
    }

    #[test]
    fn test_exception_renders_as_message() {
        let ctx = RecordContext::new()
            .with_exception(io::Error::new(io::ErrorKind::Other, "disk on fire"));
        assert_eq!(ctx.to_value(), json!({"exception": "disk on fire"}));
        assert!(!ctx.is_empty());
    }

    #[test]
    fn test_coerce_user() {
        assert_eq!(
            coerce_user(json!({"id": 5, "email": "a@b.c"})),
            json!({"id": 5, "email": "a@b.c"}).as_object().unwrap().clone()
        );
        assert_eq!(
            Value::Object(coerce_user(json!(["alice", 3]))),
            json!({"0": "alice", "1": 3})
        );
        assert!(coerce_user(Value::Null).is_empty());
        assert_eq!(Value::Object(coerce_user(json!("alice"))), json!({"id": "alice"}));
    }
}
