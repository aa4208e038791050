//! Per-request trace context and request id.
//!
//! # Responsibilities
//! - Start (or continue) a span for every request while the tracer runs
//! - Attach the resulting `Context` and a request id to request extensions
//! - Echo the request id and record request metrics on the way out

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::observability::metrics;
use crate::trace::Tracer;

/// Request id header, propagated when present and generated otherwise.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request id attached to request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

pub async fn trace_middleware(
    State(tracer): State<Arc<Tracer>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let ctx = tracer.context_for(request.headers());
    request.extensions_mut().insert(ctx);
    request.extensions_mut().insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }
    metrics::record_request(&method, response.status().as_u16(), start);

    response
}
