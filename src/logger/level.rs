//! Severity levels and the admission filter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::logger::error::LoggerError;

/// Severity of a log entry, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Lowercase name, as written to the sink.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }

    /// Uppercase name used by the console encoding.
    pub fn as_upper_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Case-insensitive; `warning` is accepted for `warn`.
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// Admits entries at or above a minimum severity.
///
/// The public API asks it only about `Debug`; the sink uses it as its write
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelFilter {
    min: Level,
}

impl LevelFilter {
    pub fn new(min: Level) -> Self {
        Self { min }
    }

    pub fn min(&self) -> Level {
        self.min
    }

    /// Return true if an entry at `level` passes the filter.
    #[inline]
    pub fn admits(&self, level: Level) -> bool {
        level >= self.min
    }
}
