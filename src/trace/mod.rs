//! Trace correlation subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP request
//!     → tracer.rs (start or continue a span)
//!     → context.rs (Context carried by every log call)
//!     → [entry waits in the queue]
//!     → provider.rs (flush-time lookup → dd.trace_id / dd.span_id fields)
//! ```
//!
//! # Design Decisions
//! - Enrichment happens at flush time, keeping the producer path short
//! - The provider is injected; the logger never owns a tracer
//! - An inactive tracer yields no fields rather than an error

pub mod context;
pub mod provider;
pub mod tracer;

pub use context::{Context, SpanContext};
pub use provider::{trace_fields, NoopProvider, TraceProvider, SPAN_ID_KEY, TRACE_ID_KEY};
pub use tracer::Tracer;
