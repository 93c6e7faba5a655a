//! Recording client used by the unit tests.

use std::io;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::client::{Breadcrumb, ErrorTracker, OutboundEvent, Severity};
use crate::record::ExceptionRef;
use crate::scope::EventScope;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedEvent {
    pub logger: Option<String>,
    pub environment: Option<String>,
    pub release: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl OutboundEvent for RecordedEvent {
    fn logger(&self) -> Option<&str> {
        self.logger.as_deref()
    }

    fn set_logger(&mut self, logger: &str) {
        self.logger = Some(logger.to_string());
    }

    fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    fn set_environment(&mut self, environment: &str) {
        self.environment = Some(environment.to_string());
    }

    fn release(&self) -> Option<&str> {
        self.release.as_deref()
    }

    fn set_release(&mut self, release: &str) {
        self.release = Some(release.to_string());
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    fn set_timestamp(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = Some(timestamp);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Captured {
    Exception(String),
    Message { text: String, severity: Severity },
}

/// One capture call with a snapshot of the scope it received.
#[derive(Debug, Clone)]
pub struct Capture {
    pub kind: Captured,
    pub tags: Vec<(String, String)>,
    pub extra: Map<String, Value>,
    pub fingerprint: Option<Vec<String>>,
    pub user: Option<Map<String, Value>>,
    pub event: RecordedEvent,
}

#[derive(Debug, Default)]
pub struct RecordingTracker {
    captures: Mutex<Vec<Capture>>,
    breadcrumbs: Mutex<Vec<Breadcrumb>>,
    /// Event fields the client fills in before processors run.
    pub preset: RecordedEvent,
    pub fail: bool,
}

impl RecordingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn captures(&self) -> Vec<Capture> {
        self.captures.lock().clone()
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.breadcrumbs.lock().clone()
    }

    fn record(&self, scope: &EventScope, kind: Captured) -> Result<Uuid, io::Error> {
        if self.fail {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "ingest unreachable"));
        }

        let mut event = self.preset.clone();
        scope.apply_to_event(&mut event);

        self.captures.lock().push(Capture {
            kind,
            tags: scope
                .tags()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            extra: scope
                .extra()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            fingerprint: scope.fingerprint().map(|f| f.to_vec()),
            user: scope.user().cloned(),
            event,
        });
        Ok(Uuid::new_v4())
    }
}

impl ErrorTracker for RecordingTracker {
    type Error = io::Error;

    fn capture_exception(
        &self,
        scope: &EventScope,
        exception: &ExceptionRef,
    ) -> Result<Uuid, Self::Error> {
        self.record(scope, Captured::Exception(exception.to_string()))
    }

    fn capture_message(
        &self,
        scope: &EventScope,
        message: &str,
        severity: Severity,
    ) -> Result<Uuid, Self::Error> {
        self.record(
            scope,
            Captured::Message {
                text: message.to_string(),
                severity,
            },
        )
    }

    fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        self.breadcrumbs.lock().push(breadcrumb);
    }
}
