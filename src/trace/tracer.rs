//! Process tracer: starts spans for requests and answers enrichment lookups.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::HeaderMap;

use crate::config::TracingConfig;
use crate::trace::context::{Context, SpanContext};
use crate::trace::provider::TraceProvider;

/// Propagated trace id header.
pub const TRACE_ID_HEADER: &str = "x-datadog-trace-id";
/// Propagated parent span id header.
pub const PARENT_ID_HEADER: &str = "x-datadog-parent-id";

/// Tracer tagged with the service it reports for.
///
/// While stopped it starts no spans and reports none as active.
#[derive(Debug)]
pub struct Tracer {
    service_name: String,
    environment: String,
    active: AtomicBool,
}

impl Tracer {
    pub fn new(config: &TracingConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            environment: config.environment.clone(),
            active: AtomicBool::new(false),
        }
    }

    pub fn start(&self) {
        if !self.active.swap(true, Ordering::AcqRel) {
            tracing::info!(
                service = %self.service_name,
                env = %self.environment,
                "Tracer started"
            );
        }
    }

    pub fn stop(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            tracing::info!(service = %self.service_name, "Tracer stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Start a span, continuing the trace in `headers` when one is propagated.
    pub fn start_span(&self, headers: &HeaderMap) -> Option<SpanContext> {
        if !self.is_active() {
            return None;
        }

        match (header_id(headers, TRACE_ID_HEADER), header_id(headers, PARENT_ID_HEADER)) {
            (Some(trace_id), Some(span_id)) => Some(SpanContext { trace_id, span_id }.child()),
            _ => Some(SpanContext::new_root()),
        }
    }

    /// Execution context for a request carrying `headers`.
    pub fn context_for(&self, headers: &HeaderMap) -> Context {
        match self.start_span(headers) {
            Some(span) => Context::with_span(span),
            None => Context::background(),
        }
    }
}

impl TraceProvider for Tracer {
    fn active_span(&self, ctx: &Context) -> Option<SpanContext> {
        if self.is_active() {
            ctx.span()
        } else {
            None
        }
    }
}

fn header_id(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
}
