//! Background consumer that batches entries and writes them to the sink.
//!
//! # Responsibilities
//! - Drain the entry queue into the current batch
//! - Flush when the batch reaches `batch_size` or the interval ticks
//! - Enrich each entry with trace fields at flush time
//! - On shutdown: close the queue, drain it, flush the remainder
//!
//! # Design Decisions
//! - Exactly one worker per logger, so the sink needs no lock
//! - A failed write is reported and skipped; the worker never stops on it
//! - The ticker runs independently of size flushes

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::logger::entry::LogEntry;
use crate::logger::queue::EntryConsumer;
use crate::logger::sink::Sink;
use crate::observability::metrics;
use crate::trace::{trace_fields, TraceProvider};

/// What caused a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushTrigger {
    Size,
    Interval,
    Drain,
}

impl FlushTrigger {
    pub fn as_str(self) -> &'static str {
        match self {
            FlushTrigger::Size => "size",
            FlushTrigger::Interval => "interval",
            FlushTrigger::Drain => "drain",
        }
    }
}

/// The batch worker. Consumed by [`BatchWorker::run`].
pub struct BatchWorker {
    queue: EntryConsumer,
    sink: Sink,
    provider: Arc<dyn TraceProvider>,
    batch: Vec<LogEntry>,
    batch_size: usize,
    flush_interval: Duration,
}

impl BatchWorker {
    pub fn new(
        queue: EntryConsumer,
        sink: Sink,
        provider: Arc<dyn TraceProvider>,
        batch_size: usize,
        flush_interval: Duration,
    ) -> Self {
        Self {
            queue,
            sink,
            provider,
            batch: Vec::with_capacity(batch_size),
            batch_size,
            flush_interval,
        }
    }

    /// Run until shutdown is signalled or every producer is gone, then drain.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::debug!(
            batch_size = self.batch_size,
            flush_interval_ms = self.flush_interval.as_millis() as u64,
            "Log batch worker starting"
        );

        let mut ticker = time::interval(self.flush_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                received = self.queue.recv() => match received {
                    Some(entry) => self.push(entry),
                    None => {
                        tracing::debug!("All log producers dropped");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    if !self.batch.is_empty() {
                        self.flush(FlushTrigger::Interval);
                    }
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Log batch worker received shutdown signal");
                    break;
                }
            }
        }

        self.drain().await;
        tracing::debug!("Log batch worker stopped");
    }

    fn push(&mut self, entry: LogEntry) {
        self.batch.push(entry);
        if self.batch.len() >= self.batch_size {
            self.flush(FlushTrigger::Size);
        }
    }

    async fn drain(&mut self) {
        self.queue.close();
        while let Some(entry) = self.queue.recv().await {
            self.push(entry);
        }
        if !self.batch.is_empty() {
            self.flush(FlushTrigger::Drain);
        }
    }

    fn flush(&mut self, trigger: FlushTrigger) {
        let count = self.batch.len();
        let mut written = 0usize;
        let mut failed = 0usize;

        for entry in self.batch.drain(..) {
            // Trace ids go first so caller fields cannot take their keys.
            let mut fields = trace_fields(self.provider.as_ref(), &entry.ctx);
            fields.extend(entry.fields);

            match self.sink.write(entry.level, &entry.message, &fields) {
                Ok(true) => written += 1,
                Ok(false) => {}
                Err(e) => {
                    failed += 1;
                    tracing::error!(
                        error = %e,
                        level = %entry.level,
                        message = %entry.message,
                        "Log sink write failed, dropping entry"
                    );
                }
            }
        }

        if let Err(e) = self.sink.flush() {
            tracing::error!(error = %e, entries = count, "Log sink flush failed");
        }

        metrics::record_flush(trigger.as_str(), count);
        metrics::record_written(written);
        if failed > 0 {
            metrics::record_write_errors(failed);
        }
    }
}
