/**
 * Application State Management
 *
 * `AppState` is the Axum router state. It holds the shared `Services`
 * (store, token keys, image storage), the built GraphQL schema and the
 * per-request limits.
 *
 * # Thread Safety
 *
 * Everything in here is cheap to clone and safe to share: the store is an
 * `Arc<dyn Store>`, the schema is reference counted internally, and no
 * field is mutated after startup.
 */

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;

use crate::backend::auth::TokenKeys;
use crate::backend::graphql::{build_schema, AppSchema};
use crate::backend::server::config::ServerConfig;
use crate::backend::store::Store;
use crate::backend::upload::ImageStore;

/// Collaborators shared by every request
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn Store>,
    pub tokens: TokenKeys,
    pub images: ImageStore,
    pub bcrypt_cost: u32,
}

impl Services {
    pub fn new(store: Arc<dyn Store>, config: &ServerConfig) -> Self {
        Self {
            store,
            tokens: TokenKeys::new(config.jwt_secret.as_bytes(), config.token_ttl),
            images: ImageStore::new(&config.image_dir),
            bcrypt_cost: config.bcrypt_cost,
        }
    }
}

/// Router state
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub schema: AppSchema,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: &ServerConfig) -> Self {
        let services = Services::new(store, config);
        let schema = build_schema(services.clone());
        Self {
            services,
            schema,
            request_timeout: config.request_timeout,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

impl FromRef<AppState> for AppSchema {
    fn from_ref(state: &AppState) -> Self {
        state.schema.clone()
    }
}

impl FromRef<AppState> for Services {
    fn from_ref(state: &AppState) -> Self {
        state.services.clone()
    }
}
