//! Asynchronous batched structured logging.
//!
//! Request code hands log entries to a bounded queue and moves on; a single
//! background worker groups them into batches and writes each batch when it
//! fills up or when the flush interval ticks, adding trace identifiers from
//! the caller's context on the way out.
//!
//! ```no_run
//! use std::sync::Arc;
//! use batchlog::{fields, logger, trace::{Context, NoopProvider}};
//! use batchlog::config::LoggerConfig;
//!
//! # async fn demo() -> Result<(), batchlog::logger::LoggerError> {
//! logger::init(LoggerConfig::default(), Arc::new(NoopProvider))?;
//!
//! let ctx = Context::background();
//! logger::info(&ctx, "Request started", fields!["user_id" => "42"]).await;
//!
//! logger::shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod logger;
pub mod observability;
pub mod trace;

pub use config::AppConfig;
pub use logger::{AsyncLogger, Field, Level};
pub use trace::Context;
