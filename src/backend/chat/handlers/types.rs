//! Chat request bodies and their validation

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{SharedError, UserRef};

/// `POST /api/chat`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AccessChatRequest {
    pub user_id: Option<String>,
}

/// `POST /api/chat/group`
///
/// `users` arrives either as a JSON-encoded array string or as an array.
#[derive(Deserialize, Debug, Default)]
pub struct CreateGroupRequest {
    pub name: Option<String>,
    pub users: Option<Value>,
}

/// `PUT /api/chat/rename`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RenameGroupRequest {
    pub chat_id: Option<String>,
    pub chat_name: Option<String>,
}

/// `PUT /api/chat/groupadd` and `PUT /api/chat/groupremove`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberRequest {
    pub chat_id: Option<String>,
    pub user_id: Option<String>,
}

/// Parse a required document ID
///
/// `missing` is the 400 message used when the value is absent or blank.
pub fn parse_id(value: Option<&str>, missing: &str) -> Result<Uuid, BackendError> {
    let value = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| BackendError::bad_request(missing))?;

    Uuid::parse_str(value).map_err(|_| BackendError::bad_request(format!("Invalid id: {}", value)))
}

fn invalid_users() -> BackendError {
    SharedError::validation("users", "expected a JSON array of user ids").into()
}

/// Decode the `users` field of a group request into member IDs
pub fn parse_group_users(users: &Value) -> Result<Vec<Uuid>, BackendError> {
    let refs: Vec<UserRef> = match users {
        Value::String(encoded) => serde_json::from_str(encoded).map_err(|_| invalid_users())?,
        Value::Array(_) => serde_json::from_value(users.clone()).map_err(|_| invalid_users())?,
        _ => return Err(invalid_users()),
    };

    let mut ids = Vec::with_capacity(refs.len());
    for user in &refs {
        let id = Uuid::parse_str(user.id()).map_err(|_| invalid_users())?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
