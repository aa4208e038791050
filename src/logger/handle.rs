//! The logger handle: startup, the four severity entry points, and shutdown.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::config::validation::validate_logger;
use crate::config::LoggerConfig;
use crate::lifecycle::Shutdown;
use crate::logger::entry::LogEntry;
use crate::logger::error::LoggerError;
use crate::logger::field::Field;
use crate::logger::level::{Level, LevelFilter};
use crate::logger::queue::{self, EntryProducer};
use crate::logger::sink::Sink;
use crate::logger::worker::BatchWorker;
use crate::observability::metrics;
use crate::trace::{Context, TraceProvider};

/// Shared handle to a running batching logger.
///
/// Cloning is cheap; all clones feed the same queue and worker. Logging calls
/// return once the entry is queued and wait only while the queue is full.
#[derive(Clone)]
pub struct AsyncLogger {
    inner: Arc<Inner>,
}

struct Inner {
    config: LoggerConfig,
    filter: LevelFilter,
    producer: EntryProducer,
    shutdown: Shutdown,
    /// Becomes `true` once the worker has drained; closed if it panicked.
    drained: watch::Receiver<bool>,
}

impl AsyncLogger {
    /// Validate `config`, build the sink, and spawn the batch worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: LoggerConfig, provider: Arc<dyn TraceProvider>) -> Result<Self, LoggerError> {
        check_config(&config)?;
        let sink = Sink::build(&config)?;
        Self::spawn(config, sink, provider)
    }

    /// Like [`AsyncLogger::start`], writing through a caller-built sink.
    pub fn start_with_sink(
        config: LoggerConfig,
        sink: Sink,
        provider: Arc<dyn TraceProvider>,
    ) -> Result<Self, LoggerError> {
        check_config(&config)?;
        Self::spawn(config, sink, provider)
    }

    fn spawn(config: LoggerConfig, sink: Sink, provider: Arc<dyn TraceProvider>) -> Result<Self, LoggerError> {
        let runtime = Handle::try_current().map_err(|_| LoggerError::NoRuntime)?;
        let min: Level = config.level.parse()?;

        let (producer, consumer) = queue::bounded(config.queue_capacity);
        let shutdown = Shutdown::new();
        let worker = BatchWorker::new(
            consumer,
            sink,
            provider,
            config.batch_size,
            Duration::from_millis(config.flush_interval_ms),
        );
        let (done, drained) = watch::channel(false);
        let stop = shutdown.subscribe();
        runtime.spawn(async move {
            worker.run(stop).await;
            done.send_replace(true);
            tracing::info!("Async logger drained");
        });

        tracing::info!(
            level = %min,
            encoding = %config.encoding,
            service = %config.service,
            env = %config.environment,
            queue_capacity = config.queue_capacity,
            batch_size = config.batch_size,
            "Async logger started"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                filter: LevelFilter::new(min),
                producer,
                shutdown,
                drained,
            }),
        })
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.inner.config
    }

    pub fn min_level(&self) -> Level {
        self.inner.filter.min()
    }

    pub fn queue_capacity(&self) -> usize {
        self.inner.producer.capacity()
    }

    /// Return true if `debug` calls produce entries.
    pub fn debug_enabled(&self) -> bool {
        self.inner.filter.admits(Level::Debug)
    }

    pub async fn info(&self, ctx: &Context, msg: impl Into<String>, fields: Vec<Field>) {
        self.enqueue(LogEntry::new(Level::Info, ctx, msg, fields)).await;
    }

    pub async fn warn(&self, ctx: &Context, msg: impl Into<String>, fields: Vec<Field>) {
        self.enqueue(LogEntry::new(Level::Warn, ctx, msg, fields)).await;
    }

    /// Log at error level with an `error` field holding `err`'s description.
    ///
    /// A caller field also named `error` is kept under `fields.error`.
    pub async fn error(
        &self,
        ctx: &Context,
        err: impl fmt::Display,
        msg: impl Into<String>,
        mut fields: Vec<Field>,
    ) {
        fields.insert(0, Field::display("error", err));
        self.enqueue(LogEntry::new(Level::Error, ctx, msg, fields)).await;
    }

    /// Log at debug level. A no-op unless the minimum severity is debug.
    pub async fn debug(&self, ctx: &Context, msg: impl Into<String>, fields: Vec<Field>) {
        if !self.debug_enabled() {
            return;
        }
        self.enqueue(LogEntry::new(Level::Debug, ctx, msg, fields)).await;
    }

    async fn enqueue(&self, entry: LogEntry) {
        let level = entry.level.as_str();
        match self.inner.producer.send(entry).await {
            Ok(()) => metrics::record_enqueued(level),
            // Stopped: the entry is dropped, callers never see logging failures.
            Err(_) => metrics::record_rejected(level),
        }
    }

    /// Stop accepting entries, flush everything queued, and wait for the worker.
    ///
    /// Every caller, concurrent or later, returns only once the drain has
    /// finished. Logging after shutdown is a silent no-op.
    pub async fn shutdown(&self) {
        self.inner.shutdown.trigger();

        let mut drained = self.inner.drained.clone();
        if drained.wait_for(|done| *done).await.is_err() {
            tracing::error!("Log batch worker terminated abnormally");
        }
    }
}

impl fmt::Debug for AsyncLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncLogger")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

fn check_config(config: &LoggerConfig) -> Result<(), LoggerError> {
    // Level and encoding get their own error kinds.
    config.level.parse::<Level>()?;
    config.encoding.parse::<crate::logger::Encoding>()?;

    match validate_logger(config).into_iter().next() {
        Some(err) => Err(LoggerError::InvalidSetting {
            field: err.field,
            reason: err.reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::NoopProvider;

    fn provider() -> Arc<dyn TraceProvider> {
        Arc::new(NoopProvider)
    }

    #[test]
    fn test_start_outside_runtime_fails() {
        let config = LoggerConfig {
            output: "stderr".into(),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            AsyncLogger::start(config, provider()),
            Err(LoggerError::NoRuntime)
        ));
    }

    #[tokio::test]
    async fn test_start_rejects_bad_settings() {
        let bad_level = LoggerConfig {
            level: "trace".into(),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            AsyncLogger::start(bad_level, provider()),
            Err(LoggerError::InvalidLevel(_))
        ));

        let bad_encoding = LoggerConfig {
            encoding: "yaml".into(),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            AsyncLogger::start(bad_encoding, provider()),
            Err(LoggerError::InvalidEncoding(_))
        ));

        let zero_batch = LoggerConfig {
            batch_size: 0,
            ..LoggerConfig::default()
        };
        assert!(matches!(
            AsyncLogger::start(zero_batch, provider()),
            Err(LoggerError::InvalidSetting { field: "logger.batch_size", .. })
        ));
    }

    #[tokio::test]
    async fn test_queue_capacity_matches_config() {
        let config = LoggerConfig {
            queue_capacity: 17,
            output: "stderr".into(),
            ..LoggerConfig::default()
        };
        let logger = AsyncLogger::start(config, provider()).unwrap();
        assert_eq!(logger.queue_capacity(), 17);
        assert_eq!(logger.min_level(), Level::Info);
        assert!(!logger.debug_enabled());
        logger.shutdown().await;
        logger.shutdown().await;
    }
}
