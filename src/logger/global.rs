//! Process-wide logger reachable from any call site.
//!
//! `init` runs once; later calls return the first logger unchanged, whatever
//! configuration they pass. The free functions panic when called before `init`.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use crate::config::LoggerConfig;
use crate::logger::error::LoggerError;
use crate::logger::field::Field;
use crate::logger::handle::AsyncLogger;
use crate::trace::{Context, TraceProvider};

static LOGGER: OnceLock<AsyncLogger> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Start the process-wide logger, or return the one already running.
///
/// A failed first attempt leaves nothing installed, so startup may retry.
pub fn init(config: LoggerConfig, provider: Arc<dyn TraceProvider>) -> Result<AsyncLogger, LoggerError> {
    if let Some(logger) = LOGGER.get() {
        return Ok(logger.clone());
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(logger) = LOGGER.get() {
        return Ok(logger.clone());
    }

    let logger = AsyncLogger::start(config, provider)?;
    Ok(LOGGER.get_or_init(|| logger).clone())
}

/// The process-wide logger, if `init` has completed.
pub fn get() -> Option<&'static AsyncLogger> {
    LOGGER.get()
}

fn installed() -> &'static AsyncLogger {
    match LOGGER.get() {
        Some(logger) => logger,
        None => panic!("batchlog: logging call before logger::init"),
    }
}

pub async fn info(ctx: &Context, msg: impl Into<String>, fields: Vec<Field>) {
    installed().info(ctx, msg, fields).await;
}

pub async fn warn(ctx: &Context, msg: impl Into<String>, fields: Vec<Field>) {
    installed().warn(ctx, msg, fields).await;
}

pub async fn error(ctx: &Context, err: impl fmt::Display, msg: impl Into<String>, fields: Vec<Field>) {
    installed().error(ctx, err, msg, fields).await;
}

pub async fn debug(ctx: &Context, msg: impl Into<String>, fields: Vec<Field>) {
    installed().debug(ctx, msg, fields).await;
}

/// Drain and stop the process-wide logger, if one was started.
pub async fn shutdown() {
    if let Some(logger) = LOGGER.get() {
        logger.shutdown().await;
    }
}
