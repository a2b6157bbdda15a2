//! Backend Module
//!
//! Server-side code for the Postboard API.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── server/      - Configuration, state, bootstrap
//! ├── routes/      - Router assembly and REST handlers
//! ├── middleware/  - CORS, auth gate, timeout, panic guard
//! ├── graphql/     - Schema, GraphQL objects, dispatcher
//! ├── feed/        - Resolver business rules
//! ├── auth/        - JWT sessions and password hashing
//! ├── upload/      - Multipart adapter and image storage
//! ├── store/       - Persistence trait and PostgreSQL store
//! └── error/       - ApiError and response conversion
//! ```

pub mod server;

pub mod routes;

pub mod middleware;

pub mod graphql;

pub mod feed;

pub mod auth;

pub mod upload;

pub mod store;

pub mod error;

pub use error::ApiError;
pub use server::create_app;
