//! Authentication test helpers
//!
//! Provides utilities for creating test users and generating tokens.

use std::time::Duration;

use uuid::Uuid;

use postboard::backend::auth::{hash_password, TokenKeys};
use postboard::backend::store::{NewUser, Store};

use super::{TestApp, TEST_SECRET};

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Insert a user directly into the store and sign a token for it
pub async fn create_test_user(app: &TestApp, email: &str, password: &str) -> TestUser {
    let password_hash = hash_password(password, 4).await.expect("Failed to hash password");
    let user = app
        .store
        .insert_user(NewUser {
            email: email.to_string(),
            name: "Test User".to_string(),
            password_hash,
        })
        .await
        .expect("Failed to insert test user");

    let token = app
        .state
        .services
        .tokens
        .create_token(user.id, &user.email)
        .expect("Failed to create test token");

    TestUser {
        id: user.id,
        email: user.email,
        password: password.to_string(),
        token,
    }
}

/// Create a test user with a unique email
pub async fn create_unique_test_user(app: &TestApp) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4());
    create_test_user(app, &email, "test_password_123").await
}

/// A token that expired an hour ago, signed with the test secret
pub fn expired_token(user_id: Uuid) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use postboard::backend::auth::Claims;

    let now = jsonwebtoken::get_current_timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        email: "expired@example.com".to_string(),
        exp: now - 3600,
        iat: now - 7200,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode expired token")
}

/// A valid-looking token signed with a different secret
pub fn foreign_token(user_id: Uuid) -> String {
    TokenKeys::new(b"some-other-secret-entirely", Duration::from_secs(3600))
        .create_token(user_id, "foreign@example.com")
        .expect("Failed to create foreign token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
