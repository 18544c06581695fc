//! Shared Module
//!
//! This module contains the wire types used by both the relay and the REST
//! layer. They carry no server state and are safe to reuse from clients or
//! tests.
//!
//! # Overview
//!
//! - **`event`** - Client and server relay events
//! - **`message`** - Read-only view over a `new message` payload
//! - **`error`** - Wire-level error types

/// Relay message payload view
pub mod message;

/// Real-time event types
pub mod event;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use message::{NewMessageView, UserRef};
pub use event::{ClientEvent, ServerEvent};
pub use error::SharedError;
