/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all routes and the middleware stack into a single Axum router.
 *
 * # Middleware Order
 *
 * Layers run outermost first:
 *
 * 1. CORS headers and `OPTIONS` short-circuit
 * 2. Panic guard (500 envelope)
 * 3. Request tracing
 * 4. Request timeout (408 envelope)
 * 5. Auth gate (`RequestContext` extension)
 *
 * Router-level layers also wrap the fallbacks, so 404 and 405 responses
 * carry the CORS headers as well.
 */

use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::backend::error::conversion::{method_not_allowed, not_found, panic_response};
use crate::backend::graphql::{graphql_handler, graphql_playground, GRAPHQL_PATH};
use crate::backend::middleware::{auth_gate, cors, enforce_timeout};
use crate::backend::routes::image_routes::{put_post_image, POST_IMAGE_PATH};
use crate::backend::server::state::AppState;

/// Prefix under which stored images are served
pub const IMAGES_PATH: &str = "/images";

pub const PLAYGROUND_PATH: &str = "/playground";

/// Create the Axum router with all routes configured
///
/// ## Routes
///
/// - `GET|POST /graphql` - GraphQL execution
/// - `GET /playground` - GraphQL Playground
/// - `PUT /post-image` - Image upload (requires authentication)
/// - `GET /images/{file}` - Stored images
///
/// ## Fallbacks
///
/// Unknown paths and missing images get the 404 envelope, known paths
/// with the wrong method the 405 envelope.
pub fn create_router(app_state: AppState) -> Router<()> {
    let upload_limit = DefaultBodyLimit::max(app_state.max_upload_bytes);
    let images_dir = app_state.services.images.dir().to_path_buf();

    Router::new()
        .route(GRAPHQL_PATH, get(graphql_handler).post(graphql_handler))
        .route(PLAYGROUND_PATH, get(graphql_playground))
        .route(POST_IMAGE_PATH, put(put_post_image).layer(upload_limit))
        .nest_service(
            IMAGES_PATH,
            ServeDir::new(images_dir).not_found_service(not_found.into_service()),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(app_state.clone(), auth_gate))
        .layer(middleware::from_fn_with_state(app_state.clone(), enforce_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(cors))
        .with_state(app_state)
}
