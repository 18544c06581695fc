/**
 * Room Registry and Broadcasting
 *
 * This module tracks live relay connections and the rooms they have joined,
 * and fans events out to room members.
 *
 * # Rooms
 *
 * A room is a plain string key: a user id (joined by `setup`) or a chat id
 * (joined by `join chat`). Membership is a flat unordered set; joining
 * twice is a no-op and empty rooms are dropped.
 *
 * # Broadcasting
 *
 * Each connection owns an unbounded `mpsc` channel. Broadcasting queues one
 * clone of the event per member and never waits on the socket, so a slow
 * client cannot stall the sender. Sends to connections whose socket task has
 * already gone away are skipped.
 */

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::shared::ServerEvent;

/// Sender half of a connection's outbound queue
pub type ConnectionSender = mpsc::UnboundedSender<ServerEvent>;

/// Receiver half of a connection's outbound queue
pub type ConnectionReceiver = mpsc::UnboundedReceiver<ServerEvent>;

/// Opaque handle for one client link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Allocate a fresh connection id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Default)]
struct Registry {
    connections: HashMap<ConnectionId, ConnectionSender>,
    rooms: HashMap<String, HashSet<ConnectionId>>,
    memberships: HashMap<ConnectionId, HashSet<String>>,
}

/// Shared registry of connections and room membership
///
/// Cloning is cheap; all clones see the same registry.
///
/// # Example
///
/// ```rust
/// use roomcast::backend::realtime::RoomRegistry;
/// use roomcast::shared::ServerEvent;
///
/// # async fn example() {
/// let registry = RoomRegistry::new();
/// let (alice, _alice_rx) = registry.connect().await;
/// let (bob, mut bob_rx) = registry.connect().await;
///
/// registry.join(alice, "chat-1").await;
/// registry.join(bob, "chat-1").await;
///
/// let sent = registry.broadcast_except("chat-1", alice, ServerEvent::Typing).await;
/// assert_eq!(sent, 1);
/// assert_eq!(bob_rx.recv().await, Some(ServerEvent::Typing));
/// # }
/// ```
#[derive(Clone, Default)]
pub struct RoomRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection and return its id and outbound queue
    pub async fn connect(&self) -> (ConnectionId, ConnectionReceiver) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.write().await.connections.insert(id, tx);
        (id, rx)
    }

    /// Remove a connection from every room it joined
    pub async fn disconnect(&self, conn: ConnectionId) {
        let mut registry = self.inner.write().await;
        registry.connections.remove(&conn);

        let Some(rooms) = registry.memberships.remove(&conn) else {
            return;
        };
        for room in rooms {
            remove_member(&mut registry.rooms, &room, conn);
        }
    }

    /// Add a connection to a room
    ///
    /// Returns `false` when the connection is unknown (already disconnected).
    pub async fn join(&self, conn: ConnectionId, room: &str) -> bool {
        let mut registry = self.inner.write().await;
        if !registry.connections.contains_key(&conn) {
            return false;
        }
        registry
            .rooms
            .entry(room.to_string())
            .or_default()
            .insert(conn);
        registry
            .memberships
            .entry(conn)
            .or_default()
            .insert(room.to_string());
        true
    }

    /// Remove a connection from a room
    ///
    /// Returns `true` when the connection was a member.
    pub async fn leave(&self, conn: ConnectionId, room: &str) -> bool {
        let mut registry = self.inner.write().await;
        let was_member = registry
            .memberships
            .get_mut(&conn)
            .map(|rooms| rooms.remove(room))
            .unwrap_or(false);
        if was_member {
            remove_member(&mut registry.rooms, room, conn);
        }
        was_member
    }

    /// Queue an event for a single connection
    pub async fn emit_to(&self, conn: ConnectionId, event: ServerEvent) -> bool {
        let registry = self.inner.read().await;
        registry
            .connections
            .get(&conn)
            .map(|sender| sender.send(event).is_ok())
            .unwrap_or(false)
    }

    /// Queue an event for every member of `room` except `except`
    ///
    /// # Returns
    ///
    /// Number of connections the event was queued for (0 if the room is empty)
    pub async fn broadcast_except(&self, room: &str, except: ConnectionId, event: ServerEvent) -> usize {
        let registry = self.inner.read().await;
        let Some(members) = registry.rooms.get(room) else {
            tracing::debug!("[Relay] No members in room {}", room);
            return 0;
        };

        members
            .iter()
            .filter(|member| **member != except)
            .filter_map(|member| registry.connections.get(member))
            .filter(|sender| sender.send(event.clone()).is_ok())
            .count()
    }

    /// Connections currently joined to `room`
    pub async fn members(&self, room: &str) -> HashSet<ConnectionId> {
        self.inner
            .read()
            .await
            .rooms
            .get(room)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of non-empty rooms
    pub async fn room_count(&self) -> usize {
        self.inner.read().await.rooms.len()
    }

    /// Number of registered connections
    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }
}

fn remove_member(rooms: &mut HashMap<String, HashSet<ConnectionId>>, room: &str, conn: ConnectionId) {
    if let Some(members) = rooms.get_mut(room) {
        members.remove(&conn);
        if members.is_empty() {
            rooms.remove(room);
        }
    }
}
