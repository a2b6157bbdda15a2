/**
 * Server Initialization
 *
 * Bootstrap for the HTTP server.
 *
 * # Initialization Process
 *
 * 1. Create the image directory
 * 2. Connect to PostgreSQL and run migrations
 * 3. Build services, GraphQL schema and router
 * 4. Bind the listener and serve until a shutdown signal
 * 5. Drain in-flight requests, then close the pool
 *
 * No listener is bound unless steps 1 and 2 succeed; every failure is
 * returned to `main`, which exits with a non-zero status.
 */

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::store::{PgStore, Store, StoreError};

/// Startup failures
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create the Axum application for an already-built state
pub fn create_app(state: AppState) -> Router<()> {
    create_router(state)
}

/// Run the server until Ctrl-C or SIGTERM
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    tracing::info!("Initializing Postboard backend server");

    let images = crate::backend::upload::ImageStore::new(&config.image_dir);
    images.ensure_dir().await?;
    tracing::info!(dir = %config.image_dir.display(), "Image directory ready");

    let pool = load_database(&config.database_url, config.connect_timeout).await?;
    let store = PgStore::new(pool.clone());
    store.ping().await?;

    let state = AppState::new(Arc::new(store), &config);
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database pool");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining requests");
}
