//! Real-time Relay Module
//!
//! This module relays chat events between connected clients. A connection
//! declares who it is (`setup`), joins chat rooms, and the relay forwards
//! typing notices and new messages to the right rooms.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── broadcast.rs    - Connection registry, rooms and fan-out
//! ├── relay.rs        - Client event dispatch
//! └── subscription.rs - WebSocket endpoint
//! ```
//!
//! # Wire Contract
//!
//! | direction | event | data |
//! |---|---|---|
//! | client → server | `setup` | user id or `{_id}` |
//! | client → server | `join chat` / `leave chat` | room id |
//! | client → server | `typing` / `stop typing` | room id |
//! | client → server | `new message` | message document |
//! | server → client | `connected` | - |
//! | server → client | `typing` / `stop typing` | - |
//! | server → client | `message received` | message document |
//!
//! # Delivery
//!
//! Fan-out is fire-and-forget: no ordering across rooms, no retries and no
//! acknowledgements.

/// Connection registry and room broadcasting
pub mod broadcast;

/// Client event dispatch
pub mod relay;

/// WebSocket endpoint
pub mod subscription;

pub use broadcast::{ConnectionId, RoomRegistry};
pub use relay::{handle_client_event, DropReason, RelayOutcome};
pub use subscription::handle_relay_socket;
