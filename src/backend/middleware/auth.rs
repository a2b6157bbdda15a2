/**
 * Auth Gate
 *
 * This middleware annotates every request with a `RequestContext`. It
 * never rejects: a missing, malformed, expired or badly signed token
 * simply yields an anonymous context. Handlers and resolvers that need
 * an identity call `RequestContext::require_user`, which fails with the
 * standard 401 error.
 */

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::TokenKeys;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Per-request authentication outcome
///
/// An anonymous context can never carry a user ID.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestContext {
    user_id: Option<Uuid>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn is_auth(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// The authenticated user, or the "Not authenticated!" error
    pub fn require_user(&self) -> Result<Uuid, ApiError> {
        self.user_id.ok_or_else(ApiError::unauthenticated)
    }
}

/// Derive the request context from the `Authorization` header
pub fn authenticate(tokens: &TokenKeys, headers: &HeaderMap) -> RequestContext {
    let Some(header) = headers.get(AUTHORIZATION) else {
        return RequestContext::anonymous();
    };

    let Some(token) = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
    else {
        tracing::debug!("Authorization header is not a bearer credential");
        return RequestContext::anonymous();
    };

    let claims = match tokens.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Rejected bearer token: {}", e);
            return RequestContext::anonymous();
        }
    };

    match Uuid::parse_str(&claims.sub) {
        Ok(user_id) => RequestContext::authenticated(user_id),
        Err(e) => {
            tracing::debug!("Token subject is not a user ID: {}", e);
            RequestContext::anonymous()
        }
    }
}

/// Authentication middleware
///
/// Attaches the `RequestContext` to the request extensions and always
/// continues down the chain.
pub async fn auth_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let context = authenticate(&state.services.tokens, request.headers());
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Axum extractor for the request context
///
/// Falls back to an anonymous context when the auth gate did not run.
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .copied()
            .unwrap_or_default())
    }
}
