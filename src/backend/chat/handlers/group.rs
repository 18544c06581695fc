/**
 * Group Chat Handlers
 *
 * Creation, rename and membership edits for group chats.
 * Edits are not restricted to the group admin.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::{count_existing_users, get_user_by_id};
use crate::backend::chat::db::{
    add_member, create_chat, populate_chat, remove_member, rename_chat, Chat, ChatRow,
};
use crate::backend::chat::handlers::types::{
    parse_group_users, parse_id, CreateGroupRequest, GroupMemberRequest, RenameGroupRequest,
};
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;

const MISSING_FIELDS: &str = "Please Fill all the feilds";
const CHAT_NOT_FOUND: &str = "Chat Not Found";
const USER_NOT_FOUND: &str = "User Not Found";

/// Minimum number of members besides the creator
pub const MIN_GROUP_USERS: usize = 2;

/// Build the member list of a new group: the given users, then the creator
pub(crate) fn group_members(users: Vec<Uuid>, creator: Uuid) -> Result<Vec<Uuid>, BackendError> {
    let mut members: Vec<Uuid> = users.into_iter().filter(|id| *id != creator).collect();
    if members.len() < MIN_GROUP_USERS {
        return Err(BackendError::bad_request(
            "More than 2 users are required to form a group chat",
        ));
    }
    members.push(creator);
    Ok(members)
}

async fn respond(pool: &PgPool, row: Option<ChatRow>) -> Result<Json<Chat>, BackendError> {
    let row = row.ok_or_else(|| BackendError::not_found(CHAT_NOT_FOUND))?;
    Ok(Json(populate_chat(pool, row).await?))
}

/// Create a group chat administered by the caller
///
/// # Errors
///
/// * `400 Bad Request` - Missing name or users, or fewer than two other users
/// * `404 Not Found` - A listed user does not exist
pub async fn create_group_chat(
    State(pool): State<PgPool>,
    AuthUser(current): AuthUser,
    Json(request): Json<CreateGroupRequest>,
) -> Result<Json<Chat>, BackendError> {
    let name = request.name.as_deref().map(str::trim).filter(|name| !name.is_empty());
    let (Some(name), Some(users)) = (name, request.users.as_ref()) else {
        return Err(BackendError::bad_request(MISSING_FIELDS));
    };

    let creator = current.user.id;
    let members = group_members(parse_group_users(users)?, creator)?;
    if count_existing_users(&pool, &members).await? != members.len() as i64 {
        return Err(BackendError::not_found(USER_NOT_FOUND));
    }

    let row = create_chat(&pool, name, true, Some(creator), &members).await?;
    tracing::info!("Created group chat {} ({} members)", row.id, members.len());

    Ok(Json(populate_chat(&pool, row).await?))
}

/// Rename a chat
pub async fn rename_group(
    State(pool): State<PgPool>,
    AuthUser(_current): AuthUser,
    Json(request): Json<RenameGroupRequest>,
) -> Result<Json<Chat>, BackendError> {
    let chat_id = parse_id(request.chat_id.as_deref(), MISSING_FIELDS)?;
    let chat_name = request
        .chat_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| BackendError::bad_request(MISSING_FIELDS))?;

    respond(&pool, rename_chat(&pool, chat_id, chat_name).await?).await
}

/// Add a user to a chat
pub async fn add_to_group(
    State(pool): State<PgPool>,
    AuthUser(_current): AuthUser,
    Json(request): Json<GroupMemberRequest>,
) -> Result<Json<Chat>, BackendError> {
    let chat_id = parse_id(request.chat_id.as_deref(), MISSING_FIELDS)?;
    let user_id = parse_id(request.user_id.as_deref(), MISSING_FIELDS)?;
    if get_user_by_id(&pool, user_id).await?.is_none() {
        return Err(BackendError::not_found(USER_NOT_FOUND));
    }

    respond(&pool, add_member(&pool, chat_id, user_id).await?).await
}

/// Remove a user from a chat
pub async fn remove_from_group(
    State(pool): State<PgPool>,
    AuthUser(_current): AuthUser,
    Json(request): Json<GroupMemberRequest>,
) -> Result<Json<Chat>, BackendError> {
    let chat_id = parse_id(request.chat_id.as_deref(), MISSING_FIELDS)?;
    let user_id = parse_id(request.user_id.as_deref(), MISSING_FIELDS)?;

    respond(&pool, remove_member(&pool, chat_id, user_id).await?).await
}
