/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the bearer token from the
 * Authorization header, loads the user and attaches it to the request.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::get_user_id_from_token;
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const NO_TOKEN: &str = "Not authorized, no token";
const TOKEN_FAILED: &str = "Not authorized, token failed";

/// Authenticated user loaded from the bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
}

/// Extract the bearer token from the request headers
///
/// Returns `None` when the header is missing or does not use the
/// `Bearer` scheme.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the token from `Authorization: Bearer <token>`
/// 2. Verifies the token and reads the user ID from its claims
/// 3. Loads that user from the database
/// 4. Attaches the user to request extensions for use in handlers
///
/// Returns 401 Unauthorized if the token is missing, invalid, or names
/// a user that no longer exists.
pub async fn protect(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        BackendError::unauthorized(NO_TOKEN)
    })?;

    let user_id = get_user_id_from_token(token, &app_state.config.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized(TOKEN_FAILED)
    })?;

    let user = get_user_by_id(&app_state.db_pool, user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token names unknown user: {}", user_id);
            BackendError::unauthorized(TOKEN_FAILED)
        })?;

    request.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid behind [`protect`]; without it the extractor rejects with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized(NO_TOKEN)
            })?;

        Ok(AuthUser(user))
    }
}
