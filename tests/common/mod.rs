//! Shared utilities for logger integration tests.

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use batchlog::config::LoggerConfig;
use batchlog::logger::{AsyncLogger, Encoding, Level, Sink};
use batchlog::trace::{Context, SpanContext, TraceProvider};
use serde_json::Value;

#[derive(Default)]
struct Captured {
    pending: Vec<u8>,
    batches: Vec<Vec<Value>>,
}

/// In-memory sink target that groups records by writer flush, i.e. by batch.
#[derive(Clone, Default)]
pub struct CaptureWriter {
    inner: Arc<Mutex<Captured>>,
    fail_on: Option<&'static str>,
}

impl CaptureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer whose `write` fails for any line containing `marker`.
    pub fn failing_on(marker: &'static str) -> Self {
        Self {
            inner: Arc::default(),
            fail_on: Some(marker),
        }
    }

    /// Records grouped by flush.
    pub fn batches(&self) -> Vec<Vec<Value>> {
        self.inner.lock().unwrap().batches.clone()
    }

    /// Messages grouped by flush.
    pub fn messages(&self) -> Vec<Vec<String>> {
        self.batches()
            .iter()
            .map(|batch| {
                batch
                    .iter()
                    .map(|r| r["msg"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }

    /// Every record, flattened in write order.
    pub fn records(&self) -> Vec<Value> {
        self.batches().into_iter().flatten().collect()
    }

    /// Wait until at least `count` flushes happened, up to two seconds.
    pub async fn wait_for_batches(&self, count: usize) {
        let waited = tokio::time::timeout(Duration::from_secs(2), async {
            while self.batches().len() < count {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(
            waited.is_ok(),
            "expected {} batches, saw {:?}",
            count,
            self.messages()
        );
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(marker) = self.fail_on {
            if String::from_utf8_lossy(buf).contains(marker) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected failure"));
            }
        }
        self.inner.lock().unwrap().pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut captured = self.inner.lock().unwrap();
        if captured.pending.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8(std::mem::take(&mut captured.pending)).unwrap();
        let batch = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        captured.batches.push(batch);
        Ok(())
    }
}

/// Provider that reports the span stored in the context.
pub struct ContextSpans;

impl TraceProvider for ContextSpans {
    fn active_span(&self, ctx: &Context) -> Option<SpanContext> {
        ctx.span()
    }
}

/// Logger config with a flush interval long enough that only size flushes fire.
pub fn config(level: &str, batch_size: usize, flush_interval_ms: u64) -> LoggerConfig {
    LoggerConfig {
        level: level.to_string(),
        service: "test-svc".to_string(),
        environment: "test".to_string(),
        queue_capacity: 64,
        batch_size,
        flush_interval_ms,
        ..LoggerConfig::default()
    }
}

/// Start a logger writing JSON into `writer`.
pub fn start(config: LoggerConfig, writer: &CaptureWriter) -> AsyncLogger {
    let min: Level = config.level.parse().unwrap();
    let sink = Sink::with_writer(
        Box::new(writer.clone()),
        Encoding::Json,
        min,
        &config.service,
        &config.environment,
    );
    AsyncLogger::start_with_sink(config, sink, Arc::new(ContextSpans)).unwrap()
}
