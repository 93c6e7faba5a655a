//! Error-tracker severities and the level mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ForwardError;
use crate::record::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a log level to the severity reported upstream.
///
/// Custom levels have no severity and are rejected rather than guessed.
pub fn map_level(level: Level) -> Result<Severity, ForwardError> {
    match level {
        Level::Debug => Ok(Severity::Debug),
        Level::Info | Level::Notice => Ok(Severity::Info),
        Level::Warning => Ok(Severity::Warning),
        Level::Error => Ok(Severity::Error),
        Level::Critical | Level::Alert | Level::Emergency => Ok(Severity::Fatal),
        Level::Custom(value) => Err(ForwardError::UnmappedLevel(value)),
    }
}
