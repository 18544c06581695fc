/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/user/login.
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same 401 response
 * - Passwords are verified using bcrypt
 */
use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::passwords::verify_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

const INVALID_CREDENTIALS: &str = "Invalid Email or Password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown email or wrong password
/// * `500 Internal Server Error` - Database or token failure
pub async fn auth_user(
    State(pool): State<PgPool>,
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let user = get_user_by_email(&pool, request.email.trim())
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login attempt for unknown email: {}", request.email);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    // A corrupt stored hash is treated as a mismatch
    let matches = verify_password(&request.password, &user.password_hash).unwrap_or_else(|e| {
        tracing::error!("Stored password hash unreadable for {}: {:?}", user.id, e);
        false
    });
    if !matches {
        tracing::warn!("Invalid password for: {}", user.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(user.id, &config.jwt_secret)?;
    tracing::info!("User logged in: {}", user.email);

    Ok(Json(AuthResponse { user, token }))
}
