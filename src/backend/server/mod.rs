//! Server Module
//!
//! Configuration, shared state and bootstrap for the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── config.rs - Environment configuration and database connection
//! ├── state.rs  - Services and AppState
//! └── init.rs   - Bootstrap, serve loop, graceful shutdown
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Dependencies**: image directory, database pool, migrations
//! 3. **State Creation**: services and GraphQL schema
//! 4. **Router Creation**: routes and middleware
//! 5. **Serve**: until Ctrl-C/SIGTERM, then drain and close the pool

pub mod config;
pub mod init;
pub mod state;

pub use init::{create_app, run, StartupError};
pub use state::{AppState, Services};
