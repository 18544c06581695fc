//! One-to-one chat access and the caller's chat list

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::chat::db::{
    chats_for_user, create_chat, find_direct_chat, populate_chat, Chat, DIRECT_CHAT_NAME,
};
use crate::backend::chat::handlers::types::{parse_id, AccessChatRequest};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

/// Find or create the one-to-one chat with `userId`
///
/// # Errors
///
/// * `400 Bad Request` - `userId` missing or malformed
/// * `404 Not Found` - No such user
pub async fn access_chat(
    State(pool): State<PgPool>,
    AuthUser(current): AuthUser,
    Json(request): Json<AccessChatRequest>,
) -> Result<Json<Chat>, BackendError> {
    let user_id = parse_id(request.user_id.as_deref(), "UserId param not sent with request")?;
    let me = current.user.id;

    if let Some(row) = find_direct_chat(&pool, me, user_id).await? {
        return Ok(Json(populate_chat(&pool, row).await?));
    }

    if get_user_by_id(&pool, user_id).await?.is_none() {
        return Err(BackendError::not_found("User Not Found"));
    }

    let row = create_chat(&pool, DIRECT_CHAT_NAME, false, None, &[me, user_id]).await?;
    tracing::info!("Created chat {} between {} and {}", row.id, me, user_id);

    Ok(Json(populate_chat(&pool, row).await?))
}

/// Every chat the caller belongs to, most recently updated first
pub async fn fetch_chats(
    State(pool): State<PgPool>,
    AuthUser(current): AuthUser,
) -> Result<Json<Vec<Chat>>, BackendError> {
    let rows = chats_for_user(&pool, current.user.id).await?;

    let mut chats = Vec::with_capacity(rows.len());
    for row in rows {
        chats.push(populate_chat(&pool, row).await?);
    }
    Ok(Json(chats))
}
