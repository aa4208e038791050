//! Execution context carried from call sites to the batch worker.

use rand::Rng;

/// Identifiers of an active span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanContext {
    pub trace_id: u64,
    pub span_id: u64,
}

impl SpanContext {
    /// Begin a new trace with random identifiers.
    pub fn new_root() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            trace_id: nonzero(&mut rng),
            span_id: nonzero(&mut rng),
        }
    }

    /// A new span in the same trace.
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id,
            span_id: nonzero(&mut rand::thread_rng()),
        }
    }
}

// Zero means "no id" in propagation headers.
fn nonzero(rng: &mut impl Rng) -> u64 {
    rng.gen_range(1..=u64::MAX)
}

/// Per-request execution context.
///
/// Cheap to clone. Log entries keep their own clone until flushed, so the
/// context stays readable however long the entry waits in the queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    span: Option<SpanContext>,
}

impl Context {
    /// A context with no span attached.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_span(span: SpanContext) -> Self {
        Self { span: Some(span) }
    }

    pub fn span(&self) -> Option<SpanContext> {
        self.span
    }
}
