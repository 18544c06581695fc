/**
 * Authentication Handler Types
 *
 * Request and response bodies for `/api/user`.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Optional avatar URL
    #[serde(default)]
    pub pic: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Auth response
///
/// The user document with the session token alongside:
/// `{_id, name, email, isAdmin, pic, ..., token}`.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: User,
    /// JWT token (30-day expiration)
    pub token: String,
}

/// Query string for `GET /api/user`
#[derive(Deserialize, Debug, Default)]
pub struct SearchQuery {
    pub search: Option<String>,
}
