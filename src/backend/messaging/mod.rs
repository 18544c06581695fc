//! Messaging Module
//!
//! Message storage and the `/api/message` handlers.

pub mod db;
pub mod handlers;

pub use handlers::{all_messages, send_message, Message};
