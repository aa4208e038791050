//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tower-http trace layer)
//!     → middleware.rs (span context, request ID)
//!     → user.rs (handler; logs through the batching logger)
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;
pub mod user;

pub use middleware::{RequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
