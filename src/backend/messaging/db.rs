/**
 * Database Operations for Messages
 *
 * Sending a message also records it as the chat's latest message.
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// A message row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub chat_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Save a message and make it the chat's latest message
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `sender_id` - Author
/// * `content` - Message text
/// * `chat_id` - Target chat
pub async fn create_message(
    pool: &PgPool,
    sender_id: Uuid,
    content: &str,
    chat_id: Uuid,
) -> Result<MessageRow, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();

    let row = sqlx::query_as::<_, MessageRow>(
        r#"
        INSERT INTO messages (id, sender_id, content, chat_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, sender_id, content, chat_id, created_at, updated_at
        "#
    )
    .bind(Uuid::new_v4())
    .bind(sender_id)
    .bind(content)
    .bind(chat_id)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE chats SET latest_message = $1, updated_at = $2 WHERE id = $3")
        .bind(row.id)
        .bind(now)
        .bind(chat_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(row)
}

/// Get a message row by ID
pub async fn get_message_row(pool: &PgPool, message_id: Uuid) -> Result<Option<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(
        "SELECT id, sender_id, content, chat_id, created_at, updated_at FROM messages WHERE id = $1",
    )
    .bind(message_id)
    .fetch_optional(pool)
    .await
}

/// Every message of a chat, oldest first
pub async fn messages_for_chat(pool: &PgPool, chat_id: Uuid) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT id, sender_id, content, chat_id, created_at, updated_at
        FROM messages
        WHERE chat_id = $1
        ORDER BY created_at ASC, id ASC
        "#
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await
}
