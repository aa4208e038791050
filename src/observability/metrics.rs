//! Metrics collection and exposition.
//!
//! # Metrics
//! - `logger_entries_enqueued_total` (counter): accepted entries by level
//! - `logger_entries_rejected_total` (counter): entries refused after shutdown
//! - `logger_batches_flushed_total` (counter): flushes by trigger (size, interval, drain)
//! - `logger_batch_size` (histogram): entries per flush
//! - `logger_entries_written_total` (counter): records handed to the sink
//! - `logger_sink_write_errors_total` (counter): failed sink writes
//! - `http_requests_total` (counter) and `http_request_duration_seconds` (histogram)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_enqueued(level: &'static str) {
    counter!("logger_entries_enqueued_total", "level" => level).increment(1);
}

pub fn record_rejected(level: &'static str) {
    counter!("logger_entries_rejected_total", "level" => level).increment(1);
}

pub fn record_flush(trigger: &'static str, entries: usize) {
    counter!("logger_batches_flushed_total", "trigger" => trigger).increment(1);
    histogram!("logger_batch_size").record(entries as f64);
}

pub fn record_written(entries: usize) {
    counter!("logger_entries_written_total").increment(entries as u64);
}

pub fn record_write_errors(entries: usize) {
    counter!("logger_sink_write_errors_total").increment(entries as u64);
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}
