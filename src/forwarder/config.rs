//! Forwarder configuration.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::record::Level;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForwarderConfig {
    /// Minimum level forwarded.
    pub level: Level,
    /// Let handled records continue to the next handler.
    pub bubble: bool,
    /// Report records carrying an exception. When off they are dropped.
    pub report_exceptions: bool,
    /// Send the formatted text instead of the raw message.
    pub use_formatted_message: bool,
    pub environment: Option<String>,
    pub release: Option<String>,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            bubble: true,
            report_exceptions: true,
            use_formatted_message: false,
            environment: None,
            release: None,
        }
    }
}

impl ForwarderConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
