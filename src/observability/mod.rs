//! Observability of the service itself.
//!
//! # Data Flow
//! ```text
//! logger worker, http layer, lifecycle
//!     → diagnostics.rs (tracing events on stderr, incl. sink write failures)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → operator terminal / stderr collector
//!     → Prometheus scrape (optional)
//! ```
//!
//! # Design Decisions
//! - Diagnostics never share a stream with application records on stdout
//! - Metric updates are no-ops until a recorder is installed

pub mod diagnostics;
pub mod metrics;
