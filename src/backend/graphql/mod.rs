//! GraphQL Dispatcher
//!
//! One schema, built at startup with the shared [`Services`] as schema
//! data. Each execution additionally receives the request's
//! `RequestContext`, so resolvers see the identity of the request they
//! run for and nothing else.
//!
//! # Module Structure
//!
//! ```text
//! graphql/
//! ├── mod.rs     - Schema type and construction
//! ├── schema.rs  - Query, Mutation, object and input types
//! └── handler.rs - HTTP handlers, error formatting, playground
//! ```

use async_graphql::{EmptySubscription, Schema};

use crate::backend::server::state::Services;

pub mod handler;
pub mod schema;

pub use handler::{graphql_handler, graphql_playground, GRAPHQL_PATH};
pub use schema::{Mutation, Query};

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema with the shared services attached
pub fn build_schema(services: Services) -> AppSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(services)
        .finish()
}

/// SDL of the schema, for client tooling
pub fn sdl() -> String {
    Schema::build(Query, Mutation, EmptySubscription).finish().sdl()
}
