/**
 * Database Operations for Chats
 *
 * This module persists chats and their member lists to PostgreSQL and
 * assembles the populated [`Chat`] documents returned by the API.
 *
 * Member order is the order of insertion into `chat_users`.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::messaging::db::get_message_row;

/// Name given to every one-to-one chat
pub const DIRECT_CHAT_NAME: &str = "sender";

/// A chat row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatRow {
    pub id: Uuid,
    pub chat_name: String,
    pub is_group_chat: bool,
    pub group_admin: Option<Uuid>,
    pub latest_message: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Latest message embedded in a chat document
///
/// `chat` stays a bare id here; the chat is the enclosing document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestMessage {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub sender: User,
    pub content: String,
    pub chat: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A chat with members, admin and latest message populated
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub chat_name: String,
    pub is_group_chat: bool,
    pub users: Vec<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_message: Option<LatestMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_admin: Option<User>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const CHAT_COLUMNS: &str =
    "c.id, c.chat_name, c.is_group_chat, c.group_admin, c.latest_message, c.created_at, c.updated_at";

/// Find the one-to-one chat between two users
pub async fn find_direct_chat(
    pool: &PgPool,
    user_a: Uuid,
    user_b: Uuid,
) -> Result<Option<ChatRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {CHAT_COLUMNS}
        FROM chats c
        WHERE c.is_group_chat = FALSE
          AND EXISTS (SELECT 1 FROM chat_users cu WHERE cu.chat_id = c.id AND cu.user_id = $1)
          AND EXISTS (SELECT 1 FROM chat_users cu WHERE cu.chat_id = c.id AND cu.user_id = $2)
        ORDER BY c.created_at
        LIMIT 1
        "#
    );

    sqlx::query_as::<_, ChatRow>(&sql)
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(pool)
        .await
}

/// Create a chat and its member list in one transaction
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `chat_name` - Display name
/// * `is_group_chat` - Group flag
/// * `group_admin` - Admin user, group chats only
/// * `members` - Member IDs, in display order
pub async fn create_chat(
    pool: &PgPool,
    chat_name: &str,
    is_group_chat: bool,
    group_admin: Option<Uuid>,
    members: &[Uuid],
) -> Result<ChatRow, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();

    let row = sqlx::query_as::<_, ChatRow>(
        r#"
        INSERT INTO chats (id, chat_name, is_group_chat, group_admin, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, chat_name, is_group_chat, group_admin, latest_message, created_at, updated_at
        "#
    )
    .bind(Uuid::new_v4())
    .bind(chat_name)
    .bind(is_group_chat)
    .bind(group_admin)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    for member in members {
        sqlx::query(
            "INSERT INTO chat_users (chat_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(row.id)
        .bind(member)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(row)
}

/// Get a chat row by ID
pub async fn get_chat_row(pool: &PgPool, chat_id: Uuid) -> Result<Option<ChatRow>, sqlx::Error> {
    let sql = format!("SELECT {CHAT_COLUMNS} FROM chats c WHERE c.id = $1");
    sqlx::query_as::<_, ChatRow>(&sql)
        .bind(chat_id)
        .fetch_optional(pool)
        .await
}

/// Every chat `user_id` belongs to, most recently updated first
pub async fn chats_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<ChatRow>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {CHAT_COLUMNS}
        FROM chats c
        JOIN chat_users cu ON cu.chat_id = c.id
        WHERE cu.user_id = $1
        ORDER BY c.updated_at DESC
        "#
    );

    sqlx::query_as::<_, ChatRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

/// Members of a chat, in insertion order
pub async fn chat_members(pool: &PgPool, chat_id: Uuid) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT u.id, u.name, u.email, u.password_hash, u.pic, u.is_admin, u.created_at, u.updated_at
        FROM chat_users cu
        JOIN users u ON u.id = cu.user_id
        WHERE cu.chat_id = $1
        ORDER BY cu.position
        "#
    )
    .bind(chat_id)
    .fetch_all(pool)
    .await
}

/// Rename a chat
///
/// Returns `None` if the chat does not exist.
pub async fn rename_chat(
    pool: &PgPool,
    chat_id: Uuid,
    chat_name: &str,
) -> Result<Option<ChatRow>, sqlx::Error> {
    sqlx::query_as::<_, ChatRow>(
        r#"
        UPDATE chats SET chat_name = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, chat_name, is_group_chat, group_admin, latest_message, created_at, updated_at
        "#
    )
    .bind(chat_id)
    .bind(chat_name)
    .fetch_optional(pool)
    .await
}

/// Bump `updated_at` and return the row, `None` if the chat does not exist
async fn touch_chat<'e, E>(executor: E, chat_id: Uuid) -> Result<Option<ChatRow>, sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query_as::<_, ChatRow>(
        r#"
        UPDATE chats SET updated_at = NOW()
        WHERE id = $1
        RETURNING id, chat_name, is_group_chat, group_admin, latest_message, created_at, updated_at
        "#
    )
    .bind(chat_id)
    .fetch_optional(executor)
    .await
}

/// Append a member to a chat
///
/// Adding an existing member leaves the list unchanged. Returns `None` if
/// the chat does not exist.
pub async fn add_member(
    pool: &PgPool,
    chat_id: Uuid,
    user_id: Uuid,
) -> Result<Option<ChatRow>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(row) = touch_chat(&mut *tx, chat_id).await? else {
        return Ok(None);
    };

    sqlx::query("INSERT INTO chat_users (chat_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
        .bind(chat_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(row))
}

/// Remove a member from a chat
///
/// Returns `None` if the chat does not exist.
pub async fn remove_member(
    pool: &PgPool,
    chat_id: Uuid,
    user_id: Uuid,
) -> Result<Option<ChatRow>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let Some(row) = touch_chat(&mut *tx, chat_id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM chat_users WHERE chat_id = $1 AND user_id = $2")
        .bind(chat_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(Some(row))
}

/// Populate members, admin and latest message of a chat row
pub async fn populate_chat(pool: &PgPool, row: ChatRow) -> Result<Chat, sqlx::Error> {
    let users = chat_members(pool, row.id).await?;

    let group_admin = match row.group_admin {
        Some(admin_id) => match users.iter().find(|user| user.id == admin_id) {
            Some(admin) => Some(admin.clone()),
            None => get_user_by_id(pool, admin_id).await?,
        },
        None => None,
    };

    let latest_message = match row.latest_message {
        Some(message_id) => match get_message_row(pool, message_id).await? {
            Some(message) => get_user_by_id(pool, message.sender_id)
                .await?
                .map(|sender| LatestMessage {
                    id: message.id,
                    sender,
                    content: message.content,
                    chat: message.chat_id,
                    created_at: message.created_at,
                    updated_at: message.updated_at,
                }),
            None => None,
        },
        None => None,
    };

    Ok(Chat {
        id: row.id,
        chat_name: row.chat_name,
        is_group_chat: row.is_group_chat,
        users,
        latest_message,
        group_admin,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Load and populate a chat by ID
pub async fn get_chat(pool: &PgPool, chat_id: Uuid) -> Result<Option<Chat>, sqlx::Error> {
    match get_chat_row(pool, chat_id).await? {
        Some(row) => Ok(Some(populate_chat(pool, row).await?)),
        None => Ok(None),
    }
}
