/**
 * Message Payload View
 *
 * This module defines the read-only view the relay uses to route a
 * `new message` payload without taking ownership of it.
 *
 * The payload is whatever `POST /api/message` returned to the sending
 * client, so the relay only cares about two paths inside it:
 * - `sender._id` - who sent it
 * - `chat.users[]._id` - who should receive it
 *
 * Every other field is forwarded untouched, which is why the payload stays
 * a `serde_json::Value` and is never deserialized into a struct.
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A reference to a user as it appears on the wire
///
/// Clients send either the bare id or the populated user document. Both
/// forms are accepted wherever a user is referenced.
///
/// # Example
/// ```rust
/// use roomcast::shared::UserRef;
///
/// let bare: UserRef = serde_json::from_str(r#""u1""#).unwrap();
/// let doc: UserRef = serde_json::from_str(r#"{"_id":"u1","name":"Ada"}"#).unwrap();
/// assert_eq!(bare.id(), doc.id());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserRef {
    /// Bare user id
    Id(String),
    /// User document carrying an `_id` field
    Document {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl UserRef {
    /// The referenced user id
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Document { id } => id,
        }
    }
}

/// Read-only view over a `new message` payload
///
/// Extracts routing information from the raw JSON. Shape problems are
/// reported as `None` so the caller can log and drop instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct NewMessageView<'a> {
    payload: &'a Value,
}

impl<'a> NewMessageView<'a> {
    /// Wrap a raw payload
    pub fn new(payload: &'a Value) -> Self {
        Self { payload }
    }

    /// The `chat` object, if present
    pub fn chat(&self) -> Option<&'a Value> {
        self.payload.get("chat").filter(|chat| chat.is_object())
    }

    /// Id of the sending user (`sender._id`, or `sender` when it is a bare id)
    pub fn sender_id(&self) -> Option<&'a str> {
        self.payload.get("sender").and_then(reference_id)
    }

    /// Ids of every participant listed in `chat.users`
    ///
    /// Returns `None` when `chat` or `chat.users` is missing or is not an
    /// array. Entries without a usable id are skipped.
    pub fn participants(&self) -> Option<Vec<&'a str>> {
        let users = self.chat()?.get("users")?.as_array()?;
        Some(users.iter().filter_map(reference_id).collect())
    }
}

/// Resolve either a bare id string or an object with `_id`
fn reference_id(value: &Value) -> Option<&str> {
    match value {
        Value::String(id) => Some(id.as_str()),
        Value::Object(map) => map.get("_id").and_then(Value::as_str),
        _ => None,
    }
}
