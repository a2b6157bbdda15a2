//! Feed Module
//!
//! Business rules behind every GraphQL field. The GraphQL layer binds a
//! fresh [`Resolvers`] to each request's [`RequestContext`] and forwards
//! the field arguments; nothing in here knows about GraphQL or HTTP.
//!
//! # Module Structure
//!
//! ```text
//! feed/
//! ├── mod.rs        - Resolvers binding, input and output models
//! ├── users.rs      - createUser, login, user, updateStatus
//! ├── posts.rs      - createPost, posts, post, updatePost, deletePost
//! └── validation.rs - Input rules
//! ```
//!
//! # Authentication
//!
//! Every operation except `create_user` and `login` calls
//! `RequestContext::require_user` first and fails with 401
//! `Not authenticated!` for anonymous requests.

use uuid::Uuid;

use crate::backend::middleware::RequestContext;
use crate::backend::server::state::Services;
use crate::backend::store::Post;

pub mod posts;
pub mod users;
pub mod validation;

/// Posts returned per page by `posts`
pub const POSTS_PER_PAGE: i64 = 2;

/// Sentinel some clients send instead of omitting `imageUrl`
pub const UNSET_IMAGE: &str = "undefined";

/// Signup input
#[derive(Debug, Clone)]
pub struct UserInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Post create/update input
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl PostInput {
    /// The image URL, unless absent, empty or the `"undefined"` sentinel
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != UNSET_IMAGE)
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    pub token: String,
    pub user_id: Uuid,
}

/// One page of posts plus the overall count
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub total_posts: i64,
}

/// Resolver set bound to one request
///
/// Built per field execution from the shared services and the request's
/// own context, so concurrent requests never observe each other's identity.
pub struct Resolvers<'a> {
    services: &'a Services,
    request: RequestContext,
}

impl<'a> Resolvers<'a> {
    pub fn bind(services: &'a Services, request: RequestContext) -> Self {
        Self { services, request }
    }
}
