//! User lookup handler.
//!
//! Exercises the logger the way request code does: several info entries per
//! request, an error entry on the failure path, and a latency entry at the end.

use std::time::{Duration, Instant};

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::fields;
use crate::http::middleware::RequestId;
use crate::http::server::AppState;
use crate::trace::Context;

/// Simulated database latency.
const QUERY_LATENCY: Duration = Duration::from_millis(50);

const ROUTE: &str = "/user/{id}";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("no user with id {0}")]
    NotFound(String),
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<Context>,
    Extension(RequestId(request_id)): Extension<RequestId>,
    Path(id): Path<String>,
) -> Response {
    let start = Instant::now();
    let log = &state.logger;

    log.info(
        &ctx,
        "Request started",
        fields!["user_id" => id.as_str(), "request_id" => request_id.as_str()],
    )
    .await;

    tokio::time::sleep(QUERY_LATENCY).await;

    log.info(&ctx, "Database query finished", fields!["user_id" => id.as_str()])
        .await;

    let response = match find_user(&id) {
        Ok(name) => {
            let response =
                (StatusCode::OK, Json(json!({ "id": id, "name": name }))).into_response();
            log.info(&ctx, "Request completed successfully", fields!["user_id" => id.as_str()])
                .await;
            response
        }
        Err(e) => {
            log.error(&ctx, &e, "User not found", fields!["user_id" => id.as_str()])
                .await;
            (StatusCode::NOT_FOUND, Json(json!({ "error": "User not found" }))).into_response()
        }
    };

    log.info(
        &ctx,
        "Request latency",
        fields!["path" => ROUTE, "latency" => format!("{:?}", start.elapsed())],
    )
    .await;

    response
}

fn find_user(id: &str) -> Result<&'static str, UserError> {
    if id == "0" {
        Err(UserError::NotFound(id.to_string()))
    } else {
        Ok("Ada Lovelace")
    }
}
