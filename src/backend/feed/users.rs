/**
 * User Resolvers
 *
 * Signup, login, profile lookup and status updates.
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt before storage
 * - Unknown e-mail and wrong password are distinct 401 errors
 *   (`User not found.` / `Password is incorrect.`)
 * - Password hashes never leave this module except through `User`, which
 *   the GraphQL layer does not expose
 */

use crate::backend::auth::{hash_password, verify_password};
use crate::backend::error::ApiError;
use crate::backend::feed::validation::check_user_input;
use crate::backend::feed::{AuthPayload, Resolvers, UserInput};
use crate::backend::store::{NewUser, Post, StoreError, User};

impl Resolvers<'_> {
    /// `createUser(userInput)`
    pub async fn create_user(&self, input: UserInput) -> Result<User, ApiError> {
        let email = input.email.trim().to_string();
        check_user_input(&email, &input.password)?;

        let store = &self.services.store;
        if store.find_user_by_email(&email).await?.is_some() {
            tracing::warn!("Email already registered: {}", email);
            return Err(ApiError::conflict("User exists already!"));
        }

        let password_hash = hash_password(&input.password, self.services.bcrypt_cost).await?;
        let user = store
            .insert_user(NewUser {
                email,
                name: input.name.trim().to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => ApiError::conflict("User exists already!"),
                other => other.into(),
            })?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// `login(email, password)`
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        let user = self
            .services
            .store
            .find_user_by_email(email.trim())
            .await?
            .ok_or_else(|| {
                tracing::warn!("Login for unknown email: {}", email);
                ApiError::unauthenticated_with("User not found.")
            })?;

        if !verify_password(password, &user.password_hash).await? {
            tracing::warn!(user_id = %user.id, "Invalid password");
            return Err(ApiError::unauthenticated_with("Password is incorrect."));
        }

        let token = self.services.tokens.create_token(user.id, &user.email)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthPayload {
            token,
            user_id: user.id,
        })
    }

    /// `user` - the authenticated user's profile
    pub async fn user(&self) -> Result<User, ApiError> {
        let user_id = self.request.require_user()?;
        self.services
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| ApiError::not_found("No user found!"))
    }

    /// `updateStatus(status)`
    pub async fn update_status(&self, status: &str) -> Result<User, ApiError> {
        let user_id = self.request.require_user()?;
        self.services
            .store
            .update_user_status(user_id, status)
            .await?
            .ok_or_else(|| ApiError::not_found("No user found!"))
    }

    /// Posts written by `user`, for the `User.posts` field
    pub async fn posts_of(&self, user: &User) -> Result<Vec<Post>, ApiError> {
        Ok(self.services.store.list_posts_by_creator(user.id).await?)
    }
}
