//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Batching logger settings.
    pub logger: LoggerConfig,

    /// Tracer settings.
    pub tracing: TracingConfig,

    /// Diagnostics and metrics settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,

    /// TCP port (string, as read from the environment).
    pub port: String,
}

impl ServerConfig {
    /// `host:port` as passed to the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: "8080".to_string(),
        }
    }
}

/// Batching logger configuration. Read-only once the logger starts.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum severity (debug, info, warn, error).
    pub level: String,

    /// Output encoding (json or console).
    pub encoding: String,

    /// Service tag written on every record.
    pub service: String,

    /// Environment tag written on every record.
    pub environment: String,

    /// Entry queue bound; producers wait when it is full.
    #[serde(alias = "async_buffer_size")]
    pub queue_capacity: usize,

    /// Entries per size-triggered flush.
    pub batch_size: usize,

    /// Time-triggered flush period in milliseconds.
    pub flush_interval_ms: u64,

    /// stdout, stderr, or a file path.
    pub output: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            encoding: "json".to_string(),
            service: "user-service".to_string(),
            environment: "production".to_string(),
            queue_capacity: 500,
            batch_size: 20,
            flush_interval_ms: 100,
            output: "stdout".to_string(),
        }
    }
}

/// Tracer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TracingConfig {
    /// Start the tracer at boot.
    pub enabled: bool,

    /// Service name spans are reported under.
    pub service_name: String,

    /// Deployment environment.
    pub environment: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            service_name: "user-service".to_string(),
            environment: "production".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter for internal diagnostics (overridden by RUST_LOG).
    pub diagnostics_filter: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            diagnostics_filter: "batchlog=info,tower_http=warn".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
