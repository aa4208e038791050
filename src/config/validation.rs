//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (capacities > 0, port valid)
//! - Reject levels and encodings the logger would refuse at startup
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::{AppConfig, LoggerConfig};
use crate::logger::{Encoding, Level};

/// A single semantic violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Check the whole configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = validate_logger(&config.logger);

    if config.server.port.parse::<u16>().is_err() {
        errors.push(ValidationError::new(
            "server.port",
            format!("{:?} is not a valid port", config.server.port),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Logger checks, shared with the logger's own startup validation.
pub fn validate_logger(logger: &LoggerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if logger.level.parse::<Level>().is_err() {
        errors.push(ValidationError::new(
            "logger.level",
            format!("{:?} is not one of debug, info, warn, error", logger.level),
        ));
    }
    if logger.encoding.parse::<Encoding>().is_err() {
        errors.push(ValidationError::new(
            "logger.encoding",
            format!("{:?} is not one of json, console", logger.encoding),
        ));
    }
    if logger.queue_capacity == 0 {
        errors.push(ValidationError::new("logger.queue_capacity", "must be at least 1"));
    }
    if logger.batch_size == 0 {
        errors.push(ValidationError::new("logger.batch_size", "must be at least 1"));
    }
    if logger.flush_interval_ms == 0 {
        errors.push(ValidationError::new("logger.flush_interval_ms", "must be at least 1"));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_violation() {
        let mut config = AppConfig::default();
        config.logger.level = "chatty".into();
        config.logger.batch_size = 0;
        config.logger.queue_capacity = 0;
        config.server.port = "http".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["logger.level", "logger.queue_capacity", "logger.batch_size", "server.port"]
        );
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
