//! GraphQL schema using async-graphql
//!
//! Query and Mutation roots plus the object and input types. Every field
//! binds a fresh [`Resolvers`] to the executing request's
//! [`RequestContext`] and forwards its arguments to it.

use async_graphql::{Context, InputObject, Object, Result, SimpleObject, ID};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::backend::feed::{PostInput, Resolvers, UserInput};
use crate::backend::middleware::RequestContext;
use crate::backend::server::state::Services;
use crate::backend::store::{Post, User};

/// Bind the feed resolvers to the request executing `ctx`
///
/// The request context is per-request schema data; a request that did not
/// pass through the auth gate is treated as anonymous.
pub fn resolvers<'a>(ctx: &Context<'a>) -> Result<Resolvers<'a>> {
    let services = ctx.data::<Services>()?;
    let request = ctx.data_opt::<RequestContext>().copied().unwrap_or_default();
    Ok(Resolvers::bind(services, request))
}

fn iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// User type
pub struct UserObject(pub User);

#[Object(name = "User")]
impl UserObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn status(&self) -> &str {
        &self.0.status
    }

    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<PostObject>> {
        let posts = resolvers(ctx)?.posts_of(&self.0).await?;
        Ok(posts.into_iter().map(PostObject).collect())
    }
}

/// Post type
pub struct PostObject(pub Post);

#[Object(name = "Post")]
impl PostObject {
    #[graphql(name = "_id")]
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn image_url(&self) -> &str {
        &self.0.image_url
    }

    async fn creator(&self, ctx: &Context<'_>) -> Result<UserObject> {
        let user = resolvers(ctx)?.creator_of(&self.0).await?;
        Ok(UserObject(user))
    }

    async fn created_at(&self) -> String {
        iso(&self.0.created_at)
    }

    async fn updated_at(&self) -> String {
        iso(&self.0.updated_at)
    }
}

#[derive(SimpleObject)]
pub struct AuthData {
    pub token: String,
    pub user_id: ID,
}

#[derive(SimpleObject)]
pub struct PostData {
    pub posts: Vec<PostObject>,
    pub total_posts: i64,
}

#[derive(InputObject)]
pub struct UserInputData {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<UserInputData> for UserInput {
    fn from(input: UserInputData) -> Self {
        Self {
            email: input.email,
            name: input.name,
            password: input.password,
        }
    }
}

#[derive(InputObject)]
pub struct PostInputData {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl From<PostInputData> for PostInput {
    fn from(input: PostInputData) -> Self {
        Self {
            title: input.title,
            content: input.content,
            image_url: input.image_url,
        }
    }
}

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthData> {
        let auth = resolvers(ctx)?.login(&email, &password).await?;
        Ok(AuthData {
            token: auth.token,
            user_id: ID(auth.user_id.to_string()),
        })
    }

    async fn posts(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<PostData> {
        let page = resolvers(ctx)?.posts(page).await?;
        Ok(PostData {
            posts: page.posts.into_iter().map(PostObject).collect(),
            total_posts: page.total_posts,
        })
    }

    async fn post(&self, ctx: &Context<'_>, id: ID) -> Result<PostObject> {
        Ok(PostObject(resolvers(ctx)?.post(&id).await?))
    }

    async fn user(&self, ctx: &Context<'_>) -> Result<UserObject> {
        Ok(UserObject(resolvers(ctx)?.user().await?))
    }
}

#[derive(Default)]
pub struct Mutation;

#[Object]
impl Mutation {
    async fn create_user(&self, ctx: &Context<'_>, user_input: UserInputData) -> Result<UserObject> {
        Ok(UserObject(resolvers(ctx)?.create_user(user_input.into()).await?))
    }

    async fn create_post(&self, ctx: &Context<'_>, post_input: PostInputData) -> Result<PostObject> {
        Ok(PostObject(resolvers(ctx)?.create_post(post_input.into()).await?))
    }

    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: ID,
        post_input: PostInputData,
    ) -> Result<PostObject> {
        Ok(PostObject(resolvers(ctx)?.update_post(&id, post_input.into()).await?))
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        Ok(resolvers(ctx)?.delete_post(&id).await?)
    }

    async fn update_status(&self, ctx: &Context<'_>, status: String) -> Result<UserObject> {
        Ok(UserObject(resolvers(ctx)?.update_status(&status).await?))
    }
}
