//! Error types.

use thiserror::Error;

/// Boxed error returned by an error-tracking client.
pub type ClientError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure while forwarding a record.
///
/// Records below the threshold, and exception records while exception
/// reporting is off, are dropped without an error.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// A custom level outside the named levels reached the message path.
    #[error("log level {0} has no severity mapping")]
    UnmappedLevel(u16),

    /// The client failed to capture the event. The client's own error is
    /// kept as the source and can be downcast.
    #[error("error tracker capture failed")]
    Capture(#[source] ClientError),
}

impl ForwardError {
    pub fn capture<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ForwardError::Capture(Box::new(err))
    }
}

/// Failure while reading forwarder configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid forwarder config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown log level: {0}")]
    UnknownLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_capture_keeps_source() {
        let err = ForwardError::capture(io::Error::new(io::ErrorKind::Other, "transport down"));
        let source = std::error::Error::source(&err).unwrap();
        let io_err = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.to_string(), "transport down");
    }

    #[test]
    fn test_unmapped_level_display() {
        assert_eq!(
            ForwardError::UnmappedLevel(42).to_string(),
            "log level 42 has no severity mapping"
        );
    }
}
