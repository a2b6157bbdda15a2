//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Router assembly and middleware stack
//! └── image_routes.rs - `PUT /post-image`
//! ```
//!
//! # Route Types
//!
//! ## GraphQL
//!
//! - `GET|POST /graphql` - Queries and mutations
//! - `GET /playground` - Interactive client
//!
//! ## REST
//!
//! - `PUT /post-image` - Image upload
//! - `GET /images/{file}` - Stored images
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use postboard::backend::routes::create_router;
//! use postboard::backend::server::{config::ServerConfig, state::AppState};
//! use postboard::backend::store::PgStore;
//!
//! # async fn example(config: ServerConfig, store: PgStore) {
//! let router = create_router(AppState::new(Arc::new(store), &config));
//! # }
//! ```

/// Main router creation
pub mod router;

/// Image upload handler
pub mod image_routes;

pub use image_routes::put_post_image;
pub use router::create_router;
