//! Middleware Module
//!
//! Request-pipeline layers, listed in the order a request passes through
//! them (see `routes::router::create_router`):
//!
//! 1. **`cors`** - CORS headers, `OPTIONS` short-circuit
//! 2. panic guard (`tower_http::catch_panic`) and request tracing
//! 3. **`timeout`** - per-request time limit
//! 4. **`auth`** - auth gate attaching `RequestContext`

/// CORS headers and preflight handling
pub mod cors;

/// Auth gate and request context
pub mod auth;

/// Request time limit
pub mod timeout;

pub use auth::{auth_gate, RequestContext};
pub use cors::cors;
pub use timeout::enforce_timeout;
