//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - An in-memory store
//! - A router wired to that store and a temporary image directory
//! - Authentication helpers
//! - Request builders for GraphQL and multipart bodies
#![allow(dead_code)]

pub mod auth_helpers;
pub mod memory_store;
pub mod requests;

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use tempfile::TempDir;
use tower::ServiceExt;

use postboard::backend::create_app;
use postboard::backend::server::{config::ServerConfig, AppState};

pub use auth_helpers::*;
pub use memory_store::MemoryStore;
pub use requests::*;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Router plus the resources backing it
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub images: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let images = tempfile::tempdir().expect("Failed to create image dir");
        let config = ServerConfig::builder()
            .database_url("postgres://unused")
            .jwt_secret(TEST_SECRET)
            .image_dir(images.path())
            .bcrypt_cost(4)
            .build()
            .expect("Invalid test configuration");
        Self::with_config(config, images)
    }

    pub fn with_config(config: ServerConfig, images: TempDir) -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), &config);
        let router = create_app(state.clone());
        Self {
            router,
            state,
            store,
            images,
        }
    }

    /// Send one request through the full middleware stack
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }
}
