//! Enrichment data applied to a single outbound event.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::client::OutboundEvent;

/// Callback run against the outbound event before it is sent.
pub type EventProcessor = Box<dyn Fn(&mut dyn OutboundEvent) + Send + Sync>;

#[derive(Default)]
pub struct EventScope {
    tags: BTreeMap<String, String>,
    extra: BTreeMap<String, Value>,
    fingerprint: Option<Vec<String>>,
    user: Option<Map<String, Value>>,
    processors: Vec<EventProcessor>,
}

impl EventScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tag(&mut self, key: &str, value: &str) {
        self.tags.insert(key.to_string(), value.to_string());
    }

    pub fn set_extra(&mut self, key: &str, value: Value) {
        self.extra.insert(key.to_string(), value);
    }

    pub fn set_fingerprint(&mut self, fingerprint: Vec<String>) {
        self.fingerprint = Some(fingerprint);
    }

    /// Set the user identity. With `merge` the keys are added to the
    /// current user; without it the user is replaced.
    pub fn set_user(&mut self, user: Map<String, Value>, merge: bool) {
        if merge {
            if let Some(current) = self.user.as_mut() {
                current.extend(user);
                return;
            }
        }
        self.user = Some(user);
    }

    pub fn add_event_processor<F>(&mut self, processor: F)
    where
        F: Fn(&mut dyn OutboundEvent) + Send + Sync + 'static,
    {
        self.processors.push(Box::new(processor));
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn fingerprint(&self) -> Option<&[String]> {
        self.fingerprint.as_deref()
    }

    pub fn user(&self) -> Option<&Map<String, Value>> {
        self.user.as_ref()
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    /// Run every registered processor against `event`, in registration order.
    pub fn apply_to_event(&self, event: &mut dyn OutboundEvent) {
        for processor in &self.processors {
            processor(&mut *event);
        }
    }
}

impl fmt::Debug for EventScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventScope")
            .field("tags", &self.tags)
            .field("extra", &self.extra)
            .field("fingerprint", &self.fingerprint)
            .field("user", &self.user)
            .field("processors", &self.processors.len())
            .finish()
    }
}
