//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (trace context, request ID, tower-http tracing)
//! - Serve until the shutdown signal fires

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::http::middleware::trace_middleware;
use crate::http::user;
use crate::lifecycle::Services;
use crate::logger::AsyncLogger;
use crate::trace::Tracer;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub logger: AsyncLogger,
    pub tracer: Arc<Tracer>,
}

impl From<&Services> for AppState {
    fn from(services: &Services) -> Self {
        Self {
            logger: services.logger.clone(),
            tracer: services.tracer.clone(),
        }
    }
}

/// HTTP server for the user service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: Self::build_router(state),
        }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/user/{id}", get(user::get_user))
            .layer(middleware::from_fn_with_state(
                state.tracer.clone(),
                trace_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server shutting down");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
