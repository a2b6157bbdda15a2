/**
 * Error Conversion
 *
 * This is the single place where errors become HTTP responses. Every
 * handler, middleware and fallback returns `ApiError`; the conversion
 * logs it and writes the uniform envelope.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "message": "Invalid input.",
 *   "data": [{ "message": "Title is invalid." }]
 * }
 * ```
 *
 * `data` is omitted when the error carries no payload. The HTTP status
 * mirrors `ApiError::status_code`.
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::backend::error::types::ApiError;

/// JSON body written for every error response
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(error: &ApiError) -> Self {
        Self {
            message: error.message(),
            data: error.data(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(ErrorEnvelope::from(&self))).into_response()
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found.")
}

/// Fallback for known routes hit with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Converts a caught panic into the standard 500 envelope
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "handler panicked");
    ApiError::internal(crate::backend::error::types::INTERNAL_MESSAGE).into_response()
}
