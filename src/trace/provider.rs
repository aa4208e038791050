//! Tracing provider capability and flush-time enrichment.

use crate::logger::Field;
use crate::trace::context::{Context, SpanContext};

/// Field key for the trace identifier.
pub const TRACE_ID_KEY: &str = "dd.trace_id";
/// Field key for the span identifier.
pub const SPAN_ID_KEY: &str = "dd.span_id";

/// Looks up the active span for an execution context.
///
/// Implementations must not panic; an inactive or absent tracer answers `None`.
pub trait TraceProvider: Send + Sync {
    fn active_span(&self, ctx: &Context) -> Option<SpanContext>;
}

/// Provider used when tracing is not wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProvider;

impl TraceProvider for NoopProvider {
    fn active_span(&self, _ctx: &Context) -> Option<SpanContext> {
        None
    }
}

/// Trace correlation fields for `ctx`, empty when no span is active.
pub fn trace_fields(provider: &dyn TraceProvider, ctx: &Context) -> Vec<Field> {
    match provider.active_span(ctx) {
        Some(span) => vec![
            Field::new(TRACE_ID_KEY, span.trace_id.to_string()),
            Field::new(SPAN_ID_KEY, span.span_id.to_string()),
        ],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Passthrough;

    impl TraceProvider for Passthrough {
        fn active_span(&self, ctx: &Context) -> Option<SpanContext> {
            ctx.span()
        }
    }

    #[test]
    fn test_no_fields_without_span() {
        assert!(trace_fields(&Passthrough, &Context::background()).is_empty());
        let ctx = Context::with_span(SpanContext { trace_id: 7, span_id: 9 });
        assert!(trace_fields(&NoopProvider, &ctx).is_empty());
    }

    #[test]
    fn test_fields_rendered_as_decimal_text() {
        let ctx = Context::with_span(SpanContext {
            trace_id: 1234567890123,
            span_id: 42,
        });
        let fields = trace_fields(&Passthrough, &ctx);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].key, TRACE_ID_KEY);
        assert_eq!(fields[0].value, json!("1234567890123"));
        assert_eq!(fields[1].key, SPAN_ID_KEY);
        assert_eq!(fields[1].value, json!("42"));
    }
}
