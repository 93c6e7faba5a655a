//! Log levels.
//!
//! Levels are ordinals on the same scale the logging pipeline uses. The
//! eight named levels cover the standard severities; any other ordinal is
//! kept as [`Level::Custom`] so it still filters correctly.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
    Custom(u16),
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    /// Build a level from its ordinal. Known ordinals become named levels.
    pub fn from_value(value: u16) -> Self {
        match value {
            100 => Level::Debug,
            200 => Level::Info,
            250 => Level::Notice,
            300 => Level::Warning,
            400 => Level::Error,
            500 => Level::Critical,
            550 => Level::Alert,
            600 => Level::Emergency,
            other => Level::Custom(other),
        }
    }

    pub fn value(&self) -> u16 {
        match self {
            Level::Debug => 100,
            Level::Info => 200,
            Level::Notice => 250,
            Level::Warning => 300,
            Level::Error => 400,
            Level::Critical => 500,
            Level::Alert => 550,
            Level::Emergency => 600,
            Level::Custom(value) => *value,
        }
    }

    /// Upper-case name used by line formats.
    pub fn name(&self) -> String {
        match self {
            Level::Debug => "DEBUG".to_string(),
            Level::Info => "INFO".to_string(),
            Level::Notice => "NOTICE".to_string(),
            Level::Warning => "WARNING".to_string(),
            Level::Error => "ERROR".to_string(),
            Level::Critical => "CRITICAL".to_string(),
            Level::Alert => "ALERT".to_string(),
            Level::Emergency => "EMERGENCY".to_string(),
            Level::Custom(value) => format!("LEVEL{}", value),
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Debug
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u16>() {
            return Ok(Level::from_value(value));
        }
        Level::ALL
            .iter()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| ConfigError::UnknownLevel(s.to_string()))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.value())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Value(u16),
            Name(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Value(value) => Ok(Level::from_value(value)),
            Raw::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}
