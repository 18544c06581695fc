/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Avatar assigned when a user registers without one
pub const DEFAULT_PIC: &str =
    "https://icon-library.com/images/anonymous-avatar-icon/anonymous-avatar-icon-25.jpg";

/// A registered user
///
/// Serializes to the document shape chat clients expect (`_id`, `isAdmin`,
/// ...). The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID)
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Avatar URL
    pub pic: String,
    /// Administrator flag
    pub is_admin: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `name` - Display name
/// * `email` - User email
/// * `password_hash` - Hashed password
/// * `pic` - Avatar URL, [`DEFAULT_PIC`] when `None`
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    pic: Option<&str>,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password_hash, pic, is_admin, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, $6, $6)
        RETURNING id, name, email, password_hash, pic, is_admin, created_at, updated_at
        "#
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(pic.unwrap_or(DEFAULT_PIC))
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by email
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, pic, is_admin, created_at, updated_at
        FROM users
        WHERE email = $1
        "#
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, pic, is_admin, created_at, updated_at
        FROM users
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Count how many of `ids` name an existing user
pub async fn count_existing_users(pool: &PgPool, ids: &[Uuid]) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = ANY($1)")
        .bind(ids)
        .fetch_one(pool)
        .await
}

/// Search users by name or email, excluding one user
///
/// Matching is a case-insensitive substring match. With no search term every
/// user except `exclude` is returned.
pub async fn search_users(
    pool: &PgPool,
    search: Option<&str>,
    exclude: Uuid,
) -> Result<Vec<User>, sqlx::Error> {
    let pattern = search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(like_pattern)
        .unwrap_or_else(|| "%".to_string());

    sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password_hash, pic, is_admin, created_at, updated_at
        FROM users
        WHERE id <> $1 AND (name ILIKE $2 OR email ILIKE $2)
        ORDER BY name ASC
        "#
    )
    .bind(exclude)
    .bind(pattern)
    .fetch_all(pool)
    .await
}

/// Build an `ILIKE` substring pattern, escaping wildcards in the term
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
