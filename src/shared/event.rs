/**
 * Real-time Event System
 *
 * This module defines the events exchanged over the relay connection.
 * Event names are the wire contract and match what chat front ends
 * already emit and listen for.
 *
 * Every frame is a JSON object of the form
 * `{"event": "<name>", "data": <payload>}`. Events without a payload
 * omit `data`.
 */
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::message::UserRef;

/// Event sent by a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Declare identity; joins the room named after the user id
    #[serde(rename = "setup")]
    Setup(UserRef),
    /// Join a chat-scoped room
    #[serde(rename = "join chat")]
    JoinChat(String),
    /// Leave a chat-scoped room
    #[serde(rename = "leave chat")]
    LeaveChat(String),
    /// Caller started typing in a room
    #[serde(rename = "typing")]
    Typing(String),
    /// Caller stopped typing in a room
    #[serde(rename = "stop typing")]
    StopTyping(String),
    /// A message was created; fan it out to the chat participants
    #[serde(rename = "new message")]
    NewMessage(Value),
}

impl ClientEvent {
    /// Wire name of this event
    pub fn name(&self) -> &'static str {
        match self {
            Self::Setup(_) => "setup",
            Self::JoinChat(_) => "join chat",
            Self::LeaveChat(_) => "leave chat",
            Self::Typing(_) => "typing",
            Self::StopTyping(_) => "stop typing",
            Self::NewMessage(_) => "new message",
        }
    }
}

/// Event sent by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Acknowledges `setup`
    #[serde(rename = "connected")]
    Connected,
    /// Someone else in the room is typing
    #[serde(rename = "typing")]
    Typing,
    /// Someone else in the room stopped typing
    #[serde(rename = "stop typing")]
    StopTyping,
    /// A message addressed to this user, forwarded verbatim
    #[serde(rename = "message received")]
    MessageReceived(Value),
}

impl ServerEvent {
    /// Wire name of this event
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Typing => "typing",
            Self::StopTyping => "stop typing",
            Self::MessageReceived(_) => "message received",
        }
    }
}
