//! Structured logging utilities.
//!
//! Diagnostic lines carry a forward id and the channel being forwarded so
//! a single `write` can be followed through the log.

use std::fmt;

use uuid::Uuid;

/// Logging context for one forwarding call.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub forward_id: String,
    pub channel: Option<String>,
}

impl LogContext {
    pub fn new() -> Self {
        Self {
            forward_id: format!("fwd-{}", &Uuid::new_v4().to_string()[..8]),
            channel: None,
        }
    }

    pub fn with_channel(&self, channel: &str) -> Self {
        Self {
            forward_id: self.forward_id.clone(),
            channel: Some(channel.to_string()),
        }
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.channel {
            Some(channel) => write!(f, "[forward={}] [channel={}]", self.forward_id, channel),
            None => write!(f, "[forward={}]", self.forward_id),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr) => {
        log::info!("{} {}", $ctx, $event);
    };
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr) => {
        log::debug!("{} {}", $ctx, $event);
    };
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a warning with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr) => {
        log::warn!("{} {}", $ctx, $event);
    };
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log an error with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr) => {
        log::error!("{} {}", $ctx, $event);
    };
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}
