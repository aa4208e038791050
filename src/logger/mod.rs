//! Asynchronous, batched structured logging.
//!
//! # Data Flow
//! ```text
//! call site
//!     → handle.rs / global.rs (level check, build entry)
//!     → queue.rs (bounded FIFO, producer waits when full)
//!     → worker.rs (accumulate; flush on batch size or 100ms tick)
//!     → trace enrichment (dd.trace_id, dd.span_id)
//!     → sink.rs (one structured line per record)
//! ```
//!
//! # Design Decisions
//! - Callers never wait on I/O or encoding, only on queue capacity
//! - Backpressure instead of dropping entries
//! - A single consumer owns the sink, so no lock guards it
//! - Explicit stop-and-drain for graceful shutdown

pub mod entry;
pub mod error;
pub mod field;
pub mod global;
pub mod handle;
pub mod level;
pub mod queue;
pub mod sink;
pub mod worker;

pub use entry::LogEntry;
pub use error::LoggerError;
pub use field::Field;
pub use global::{debug, error, get, info, init, shutdown, warn};
pub use handle::AsyncLogger;
pub use level::{Level, LevelFilter};
pub use sink::{Encoding, OutputTarget, Sink};
pub use worker::{BatchWorker, FlushTrigger};
