//! User search handler (GET /api/user?search=)

use axum::{
    extract::{Query, State},
    response::Json,
};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::SearchQuery;
use crate::backend::auth::users::{search_users, User};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// List users whose name or email contains `search`, excluding the caller
pub async fn all_users(
    State(pool): State<PgPool>,
    AuthUser(current): AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<User>>, BackendError> {
    let users = search_users(&pool, query.search.as_deref(), current.user.id).await?;
    tracing::debug!("User search {:?} returned {} results", query.search, users.len());
    Ok(Json(users))
}
