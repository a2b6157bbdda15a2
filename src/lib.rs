//! Postboard - Main Library
//!
//! Postboard is a small social-posting backend built on Axum. Users sign up,
//! log in, write posts with an image and keep a short status line. Everything
//! except image upload goes through a single GraphQL endpoint.
//!
//! # Overview
//!
//! The library is organized around the request-handling pipeline:
//!
//! - CORS headers and `OPTIONS` short-circuit on every request
//! - A non-blocking auth gate that annotates each request with a
//!   [`RequestContext`](backend::middleware::auth::RequestContext)
//! - GraphQL dispatch with the request context bound per request
//! - An authenticated `PUT /post-image` upload side channel
//! - A single error formatter producing `{ message, data }` envelopes
//!
//! # Module Structure
//!
//! - **`backend`** - Server-side code
//!   - Axum router, middleware, GraphQL schema and handlers
//!   - Feed resolvers (users and posts business rules)
//!   - PostgreSQL persistence behind the `Store` trait
//!   - Image upload storage
//!
//! # Usage
//!
//! ```rust,no_run
//! use postboard::backend::server::{config::ServerConfig, init::run};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! run(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` with `?` for fallible operations
//! - `backend::error::ApiError` for everything that can reach a client
//! - `backend::store::StoreError` for persistence failures

/// Backend server-side code
pub mod backend;
