//! Store Module
//!
//! Persistence for users and posts. Resolvers only see the [`Store`] trait;
//! the server wires in [`postgres::PgStore`], tests wire in an in-memory
//! implementation.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs      - Store trait, models, StoreError
//! └── postgres.rs - sqlx/PostgreSQL implementation
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod postgres;

pub use postgres::PgStore;

/// Status every new user starts with
pub const DEFAULT_STATUS: &str = "I am new!";

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    /// bcrypt hash, never exposed through the API
    pub password_hash: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A post written by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Storage path returned by `PUT /post-image`
    pub image_url: String,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

/// Fields needed to insert a post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator_id: Uuid,
}

/// Replacement values for an existing post
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Unique constraint violated (e.g. duplicate email)
    #[error("duplicate value for {0}")]
    Duplicate(&'static str),
}

/// Persistence operations used by the resolvers
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait Store: Send + Sync {
    /// Round-trip check used at startup
    async fn ping(&self) -> Result<(), StoreError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Returns `None` when the user does not exist
    async fn update_user_status(&self, id: Uuid, status: &str)
        -> Result<Option<User>, StoreError>;

    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError>;

    async fn find_post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Posts ordered newest first
    async fn list_posts(&self, offset: i64, limit: i64) -> Result<Vec<Post>, StoreError>;

    async fn count_posts(&self) -> Result<i64, StoreError>;

    /// Posts of one creator, newest first
    async fn list_posts_by_creator(&self, creator_id: Uuid) -> Result<Vec<Post>, StoreError>;

    /// Returns `None` when the post does not exist
    async fn update_post(&self, id: Uuid, changes: PostChanges)
        -> Result<Option<Post>, StoreError>;

    /// Returns whether a post was deleted
    async fn delete_post(&self, id: Uuid) -> Result<bool, StoreError>;
}
