//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Start tracer → Start logger → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting requests → Drain logger → Stop tracer → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered shutdown: the logger drains after the last handler has logged

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start_services, stop_services, Services};
