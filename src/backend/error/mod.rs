//! Backend Error Module
//!
//! This module defines the error type used by every handler and resolver,
//! and the one conversion that turns it into an HTTP response.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - ApiError and its status/message/data mapping
//! └── conversion.rs - IntoResponse, fallbacks, panic handler
//! ```
//!
//! # Propagation
//!
//! Components either complete or return `ApiError`. Nothing writes an
//! ad-hoc error body; the only non-error short-circuits are the CORS
//! preflight answer and the "No file provided!" upload answer.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::ErrorEnvelope;
pub use types::{ApiError, ValidationIssue};
