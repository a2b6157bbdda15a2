/**
 * API Error Types
 *
 * This module defines the error type returned by every handler, middleware
 * and resolver in the backend. Each variant knows its HTTP status, the
 * message shown to clients and an optional structured `data` payload.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` - Input rejected by a resolver (422, carries field issues)
 * - `BadRequest` - Malformed request body (400)
 * - `Unauthenticated` - Authentication required but `is_auth` is false (401)
 * - `Forbidden` - Authenticated but not the owner (403)
 * - `NotFound` - Referenced entity or route absent (404)
 * - `Conflict` - Unique entity already exists (409)
 *
 * ## Server Errors
 *
 * Store, file-system, token and hashing failures are logged with their
 * details and shown to clients as a generic 500 message.
 */

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::backend::store::StoreError;

/// Message shown to clients for every 500-class failure
pub const INTERNAL_MESSAGE: &str = "An error occurred";

/// A single rejected input, reported in the `data` payload of a validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Backend error type
///
/// # Usage
///
/// ```rust
/// use postboard::backend::error::ApiError;
///
/// let err = ApiError::not_found("No post found!");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected by business rules
    #[error("{message}")]
    Validation {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    /// Malformed request
    #[error("{message}")]
    BadRequest { message: String },

    /// Authentication required
    #[error("{message}")]
    Unauthenticated { message: String },

    /// Authenticated caller may not touch this resource
    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("Method not allowed.")]
    MethodNotAllowed,

    #[error("Request timed out.")]
    Timeout,

    #[error("{message}")]
    Conflict { message: String },

    /// Unexpected failure with a message that is safe to show
    #[error("{message}")]
    Internal { message: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self::Validation {
            message: message.into(),
            issues,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// The standard "Not authenticated!" error
    pub fn unauthenticated() -> Self {
        Self::unauthenticated_with("Not authenticated!")
    }

    pub fn unauthenticated_with(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// The standard "Not authorized!" error
    pub fn forbidden() -> Self {
        Self::Forbidden {
            message: "Not authorized!".to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 422 Unprocessable Entity
    /// - `BadRequest` - 400 Bad Request
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `MethodNotAllowed` - 405 Method Not Allowed
    /// - `Timeout` - 408 Request Timeout
    /// - `Conflict` - 409 Conflict
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. }
            | Self::Store(_)
            | Self::Io(_)
            | Self::Token(_)
            | Self::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message shown to clients
    ///
    /// Wrapped library errors never leak their details.
    pub fn message(&self) -> String {
        match self {
            Self::Store(_) | Self::Io(_) | Self::Token(_) | Self::Hash(_) => {
                INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// Get the structured payload, if this error carries one
    pub fn data(&self) -> Option<serde_json::Value> {
        match self {
            Self::Validation { issues, .. } => serde_json::to_value(issues).ok(),
            _ => None,
        }
    }
}
