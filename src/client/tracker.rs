//! Error-tracking client seam.

use std::sync::Arc;

use uuid::Uuid;

use crate::record::ExceptionRef;
use crate::scope::EventScope;

use super::breadcrumb::Breadcrumb;
use super::severity::Severity;

/// Client the forwarder hands events to.
///
/// Each capture call receives the scope built for that one call. The
/// client applies the scope's tags, extras, fingerprint, user and event
/// processors to the event it builds; the scope is dropped once the call
/// returns.
pub trait ErrorTracker {
    type Error: std::error::Error + Send + Sync + 'static;

    fn capture_exception(
        &self,
        scope: &EventScope,
        exception: &ExceptionRef,
    ) -> Result<Uuid, Self::Error>;

    fn capture_message(
        &self,
        scope: &EventScope,
        message: &str,
        severity: Severity,
    ) -> Result<Uuid, Self::Error>;

    fn add_breadcrumb(&self, breadcrumb: Breadcrumb);
}

impl<T: ErrorTracker + ?Sized> ErrorTracker for Arc<T> {
    type Error = T::Error;

    fn capture_exception(
        &self,
        scope: &EventScope,
        exception: &ExceptionRef,
    ) -> Result<Uuid, Self::Error> {
        (**self).capture_exception(scope, exception)
    }

    fn capture_message(
        &self,
        scope: &EventScope,
        message: &str,
        severity: Severity,
    ) -> Result<Uuid, Self::Error> {
        (**self).capture_message(scope, message, severity)
    }

    fn add_breadcrumb(&self, breadcrumb: Breadcrumb) {
        (**self).add_breadcrumb(breadcrumb)
    }
}
