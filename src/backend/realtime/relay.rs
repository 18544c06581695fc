//! Relay event dispatch
//!
//! Applies one decoded [`ClientEvent`] from a connection to the room
//! registry. Nothing here validates permissions: any connection may join any
//! room and typing notices go to whoever is in the room.

use crate::backend::realtime::broadcast::{ConnectionId, RoomRegistry};
use crate::shared::{ClientEvent, NewMessageView, ServerEvent};

/// Why a `new message` event was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// `chat` is missing or is not an object
    MissingChat,
    /// `chat.users` is missing or is not an array
    MissingUsers,
    /// `sender._id` is missing
    MissingSender,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingChat => "chat not defined",
            Self::MissingUsers => "chat.users not defined",
            Self::MissingSender => "sender not defined",
        }
    }
}

/// What the relay did with an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// `setup`: joined the user room and acknowledged with `connected`
    Connected { room: String },
    /// Joined a room
    Joined { room: String },
    /// Left a room (or was not in it)
    Left { room: String },
    /// Event fanned out to this many connections
    Broadcast { event: &'static str, recipients: usize },
    /// Malformed payload, logged and ignored
    Dropped(DropReason),
}

/// Handle one client event on behalf of connection `conn`
pub async fn handle_client_event(
    registry: &RoomRegistry,
    conn: ConnectionId,
    event: ClientEvent,
) -> RelayOutcome {
    tracing::debug!("[Relay] {} -> {}", conn, event.name());

    match event {
        ClientEvent::Setup(user) => {
            let room = user.id().to_string();
            registry.join(conn, &room).await;
            registry.emit_to(conn, ServerEvent::Connected).await;
            tracing::info!("[Relay] Connection {} set up as user {}", conn, room);
            RelayOutcome::Connected { room }
        }
        ClientEvent::JoinChat(room) => {
            registry.join(conn, &room).await;
            tracing::info!("[Relay] User joined room: {}", room);
            RelayOutcome::Joined { room }
        }
        ClientEvent::LeaveChat(room) => {
            registry.leave(conn, &room).await;
            tracing::debug!("[Relay] Connection {} left room {}", conn, room);
            RelayOutcome::Left { room }
        }
        ClientEvent::Typing(room) => {
            let recipients = registry.broadcast_except(&room, conn, ServerEvent::Typing).await;
            RelayOutcome::Broadcast { event: "typing", recipients }
        }
        ClientEvent::StopTyping(room) => {
            let recipients = registry
                .broadcast_except(&room, conn, ServerEvent::StopTyping)
                .await;
            RelayOutcome::Broadcast { event: "stop typing", recipients }
        }
        ClientEvent::NewMessage(payload) => relay_new_message(registry, conn, payload).await,
    }
}

/// Deliver `message received` to every participant's room except the sender's
async fn relay_new_message(
    registry: &RoomRegistry,
    conn: ConnectionId,
    payload: serde_json::Value,
) -> RelayOutcome {
    let view = NewMessageView::new(&payload);

    let Some(participants) = view.participants() else {
        let reason = if view.chat().is_none() {
            DropReason::MissingChat
        } else {
            DropReason::MissingUsers
        };
        tracing::warn!("[Relay] Dropping new message from {}: {}", conn, reason.as_str());
        return RelayOutcome::Dropped(reason);
    };

    let Some(sender_id) = view.sender_id() else {
        tracing::warn!(
            "[Relay] Dropping new message from {}: {}",
            conn,
            DropReason::MissingSender.as_str()
        );
        return RelayOutcome::Dropped(DropReason::MissingSender);
    };

    let mut recipients = 0;
    for user_id in participants.into_iter().filter(|id| *id != sender_id) {
        recipients += registry
            .broadcast_except(user_id, conn, ServerEvent::MessageReceived(payload.clone()))
            .await;
    }

    tracing::debug!("[Relay] Message from {} delivered to {} connections", sender_id, recipients);
    RelayOutcome::Broadcast { event: "message received", recipients }
}
