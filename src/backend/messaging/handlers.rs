/**
 * Message HTTP Handlers
 *
 * `POST /api/message` and `GET /api/message/{chatId}`.
 *
 * The document returned by `send_message` is what clients forward as the
 * `new message` relay payload, so it carries `chat.users`.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::chat::db::{get_chat, Chat};
use crate::backend::error::BackendError;
use crate::backend::messaging::db::{create_message, messages_for_chat, MessageRow};
use crate::backend::middleware::AuthUser;

const INVALID_DATA: &str = "Invalid data passed into request";

/// `POST /api/message`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: Option<String>,
    pub chat_id: Option<String>,
}

/// A message with sender and chat populated
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub sender: User,
    pub content: String,
    pub chat: Chat,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    fn from_row(row: MessageRow, sender: User, chat: Chat) -> Self {
        Self {
            id: row.id,
            sender,
            content: row.content,
            chat,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Validate a send request into `(content, chat_id)`
pub(crate) fn validate_send(request: &SendMessageRequest) -> Result<(&str, Uuid), BackendError> {
    let content = request.content.as_deref().filter(|content| !content.is_empty());
    let chat_id = request
        .chat_id
        .as_deref()
        .and_then(|id| Uuid::parse_str(id.trim()).ok());

    match (content, chat_id) {
        (Some(content), Some(chat_id)) => Ok((content, chat_id)),
        _ => Err(BackendError::bad_request(INVALID_DATA)),
    }
}

/// Send a message to a chat
///
/// # Errors
///
/// * `400 Bad Request` - Missing content or chatId
/// * `404 Not Found` - No such chat
pub async fn send_message(
    State(pool): State<PgPool>,
    AuthUser(current): AuthUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<Message>, BackendError> {
    let (content, chat_id) = validate_send(&request).inspect_err(|_| {
        tracing::warn!("Invalid data passed into request: {:?}", request);
    })?;

    if get_chat(&pool, chat_id).await?.is_none() {
        return Err(BackendError::not_found("Chat Not Found"));
    }

    let row = create_message(&pool, current.user.id, content, chat_id).await?;

    // Reload so the embedded chat reflects the new latest message
    let chat = get_chat(&pool, chat_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Chat Not Found"))?;

    tracing::debug!("Message {} sent to chat {}", row.id, chat_id);
    Ok(Json(Message::from_row(row, current.user, chat)))
}

/// Every message of a chat, oldest first
pub async fn all_messages(
    State(pool): State<PgPool>,
    AuthUser(_current): AuthUser,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<Message>>, BackendError> {
    let chat_id = Uuid::parse_str(chat_id.trim())
        .map_err(|_| BackendError::bad_request(format!("Invalid id: {}", chat_id)))?;

    let chat = get_chat(&pool, chat_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Chat Not Found"))?;

    let rows = messages_for_chat(&pool, chat_id).await?;

    let mut messages = Vec::with_capacity(rows.len());
    for row in rows {
        // Former members are no longer in chat.users
        let sender = match chat.users.iter().find(|user| user.id == row.sender_id) {
            Some(user) => user.clone(),
            None => match get_user_by_id(&pool, row.sender_id).await? {
                Some(user) => user,
                None => continue,
            },
        };
        messages.push(Message::from_row(row, sender, chat.clone()));
    }

    Ok(Json(messages))
}
