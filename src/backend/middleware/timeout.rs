//! Request timeout.
//!
//! Requests running longer than the configured limit are dropped and
//! answered with the 408 envelope.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

pub async fn enforce_timeout(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limit = state.request_timeout;
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(limit_ms = limit.as_millis() as u64, "request exceeded timeout");
            ApiError::Timeout.into_response()
        }
    }
}
