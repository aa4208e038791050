//! Errors raised while starting the logging pipeline.

use thiserror::Error;

/// Startup errors. Once the pipeline runs, nothing is surfaced to callers.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Minimum severity is not one of debug, info, warn, error.
    #[error("invalid log level: {0:?}")]
    InvalidLevel(String),

    /// Encoding is neither json nor console.
    #[error("invalid log encoding: {0:?}")]
    InvalidEncoding(String),

    /// A numeric tunable is out of range.
    #[error("invalid logger setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    /// The output target could not be opened.
    #[error("failed to build log sink for {target}")]
    SinkBuild {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Started outside a tokio runtime, so the worker cannot be spawned.
    #[error("logger must be started inside a tokio runtime")]
    NoRuntime,
}
