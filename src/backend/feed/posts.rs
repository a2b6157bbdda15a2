/**
 * Post Resolvers
 *
 * Authenticated CRUD over posts. Only the creator may update or delete a
 * post; deleting a post also removes its stored image (best effort).
 */

use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::feed::validation::{check_post_input, Checks, MIN_TEXT_LEN};
use crate::backend::feed::{PostInput, PostPage, Resolvers, POSTS_PER_PAGE};
use crate::backend::store::{NewPost, Post, PostChanges, User};

/// Parse a client-supplied post ID; malformed IDs are simply not found
fn parse_post_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id.trim()).map_err(|_| ApiError::not_found("No post found!"))
}

/// Offset of the first post on `page` (1-based, values below 1 clamp to 1)
pub fn page_offset(page: Option<i32>) -> i64 {
    let page = i64::from(page.unwrap_or(1).max(1));
    (page - 1) * POSTS_PER_PAGE
}

impl Resolvers<'_> {
    async fn load_post(&self, id: &str) -> Result<Post, ApiError> {
        let id = parse_post_id(id)?;
        self.services
            .store
            .find_post(id)
            .await?
            .ok_or_else(|| ApiError::not_found("No post found!"))
    }

    /// Load a post and make sure the caller created it
    async fn load_owned_post(&self, id: &str) -> Result<Post, ApiError> {
        let user_id = self.request.require_user()?;
        let post = self.load_post(id).await?;
        if post.creator_id != user_id {
            tracing::warn!(post_id = %post.id, %user_id, "Post owned by another user");
            return Err(ApiError::forbidden());
        }
        Ok(post)
    }

    /// `createPost(postInput)`
    pub async fn create_post(&self, input: PostInput) -> Result<Post, ApiError> {
        let user_id = self.request.require_user()?;

        let image_url = input.image().map(str::to_string);
        Checks::new()
            .require(input.title.trim().chars().count() >= MIN_TEXT_LEN, "Title is invalid.")
            .require(input.content.trim().chars().count() >= MIN_TEXT_LEN, "Content is invalid.")
            .require(image_url.is_some(), "Image is required.")
            .finish()?;

        let store = &self.services.store;
        let creator = store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthenticated_with("Invalid user."))?;

        let post = store
            .insert_post(NewPost {
                title: input.title.trim().to_string(),
                content: input.content.trim().to_string(),
                image_url: image_url.unwrap_or_default(),
                creator_id: creator.id,
            })
            .await?;

        tracing::info!(post_id = %post.id, creator_id = %creator.id, "Post created");
        Ok(post)
    }

    /// `posts(page)` - newest first, `POSTS_PER_PAGE` per page
    pub async fn posts(&self, page: Option<i32>) -> Result<PostPage, ApiError> {
        self.request.require_user()?;

        let store = &self.services.store;
        let total_posts = store.count_posts().await?;
        let posts = store.list_posts(page_offset(page), POSTS_PER_PAGE).await?;

        Ok(PostPage { posts, total_posts })
    }

    /// `post(id)`
    pub async fn post(&self, id: &str) -> Result<Post, ApiError> {
        self.request.require_user()?;
        self.load_post(id).await
    }

    /// `updatePost(id, postInput)`
    ///
    /// An absent or `"undefined"` image URL keeps the current image.
    pub async fn update_post(&self, id: &str, input: PostInput) -> Result<Post, ApiError> {
        let post = self.load_owned_post(id).await?;
        check_post_input(&input.title, &input.content)?;

        let image_url = input
            .image()
            .map(str::to_string)
            .unwrap_or_else(|| post.image_url.clone());

        let updated = self
            .services
            .store
            .update_post(
                post.id,
                PostChanges {
                    title: input.title.trim().to_string(),
                    content: input.content.trim().to_string(),
                    image_url,
                },
            )
            .await?
            .ok_or_else(|| ApiError::not_found("No post found!"))?;

        tracing::info!(post_id = %updated.id, "Post updated");
        Ok(updated)
    }

    /// `deletePost(id)`
    pub async fn delete_post(&self, id: &str) -> Result<bool, ApiError> {
        let post = self.load_owned_post(id).await?;

        self.services.images.clear(&post.image_url).await;
        if !self.services.store.delete_post(post.id).await? {
            return Err(ApiError::not_found("No post found!"));
        }

        tracing::info!(post_id = %post.id, "Post deleted");
        Ok(true)
    }

    /// Creator of `post`, for the `Post.creator` field
    pub async fn creator_of(&self, post: &Post) -> Result<User, ApiError> {
        self.services
            .store
            .find_user(post.creator_id)
            .await?
            .ok_or_else(|| ApiError::not_found("No user found!"))
    }
}
