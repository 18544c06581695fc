/**
 * Registration Handler
 *
 * This module implements the user registration handler for POST /api/user.
 *
 * # Registration Process
 *
 * 1. Require name, email and password
 * 2. Reject an email that is already registered
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Return the user document with a fresh token
 */

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::passwords::hash_password;
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

const USER_EXISTS: &str = "User already exists";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Check the required registration fields
pub(crate) fn validate_registration(request: &RegisterRequest) -> Result<(), BackendError> {
    let missing = [&request.name, &request.email, &request.password]
        .iter()
        .any(|field| field.trim().is_empty());
    if missing {
        return Err(BackendError::bad_request("Please Enter all the Feilds"));
    }
    Ok(())
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - A required field is empty, or the email is taken
/// * `500 Internal Server Error` - Hashing, database or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/user HTTP/1.1
/// Content-Type: application/json
///
/// {"name": "Ada", "email": "ada@example.com", "password": "hunter22"}
/// ```
pub async fn register_user(
    State(pool): State<PgPool>,
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    validate_registration(&request)?;

    let email = request.email.trim();
    if get_user_by_email(&pool, email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::bad_request(USER_EXISTS));
    }

    let password_hash = hash_password(&request.password)?;
    let pic = request.pic.as_deref().filter(|pic| !pic.trim().is_empty());
    // a concurrent registration can still win the UNIQUE(email) race
    let user = match create_user(&pool, request.name.trim(), email, &password_hash, pic).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            tracing::warn!("Email already exists: {}", email);
            return Err(BackendError::bad_request(USER_EXISTS));
        }
        Err(e) => return Err(e.into()),
    };
    let token = create_token(user.id, &config.jwt_secret)?;

    tracing::info!("User created successfully: {} ({})", user.name, user.email);

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}
