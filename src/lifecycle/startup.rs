//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the tracer when enabled
//! - Start the process-wide logger with the tracer as its provider
//!
//! # Design Decisions
//! - Fail fast: a bad level or an unopenable output aborts startup
//! - Subsystems initialize in order: tracer before the logger that reads it

use std::sync::Arc;

use crate::config::AppConfig;
use crate::logger::{self, AsyncLogger, LoggerError};
use crate::trace::Tracer;

/// Services shared by request handlers.
#[derive(Debug, Clone)]
pub struct Services {
    pub tracer: Arc<Tracer>,
    pub logger: AsyncLogger,
}

/// Start the tracer and the process-wide logger.
pub fn start_services(config: &AppConfig) -> Result<Services, LoggerError> {
    let tracer = Arc::new(Tracer::new(&config.tracing));
    if config.tracing.enabled {
        tracer.start();
    }

    let logger = logger::init(config.logger.clone(), tracer.clone())?;
    Ok(Services { tracer, logger })
}

/// Drain the logger, then stop the tracer.
pub async fn stop_services(services: &Services) {
    services.logger.shutdown().await;
    services.tracer.stop();
}
