//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: optional TOML file, then environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// Empty values are ignored, as are integers that fail to parse.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get("SERVER_PORT") {
        config.server.port = v;
    }
    if let Some(v) = get("LOG_LEVEL") {
        config.logger.level = v;
    }
    if let Some(v) = get("LOG_ENCODING") {
        config.logger.encoding = v;
    }
    if let Some(v) = get("SERVICE_NAME") {
        config.logger.service = v;
    }
    if let Some(v) = get("ENVIRONMENT") {
        config.logger.environment = v;
    }
    if let Some(v) = get("LOG_ASYNC_BUFFER_SIZE").and_then(|v| v.parse().ok()) {
        config.logger.queue_capacity = v;
    }
    if let Some(v) = get("LOG_BATCH_SIZE").and_then(|v| v.parse().ok()) {
        config.logger.batch_size = v;
    }
    if let Some(v) = get("DD_SERVICE_NAME") {
        config.tracing.service_name = v;
    }
    if let Some(v) = get("DD_ENVIRONMENT") {
        config.tracing.environment = v;
    }
}
