//! Chat Module
//!
//! One-to-one and group chats: storage in `db` and the `/api/chat`
//! handlers in `handlers`.

pub mod db;
pub mod handlers;

pub use db::{Chat, ChatRow};
pub use handlers::{
    access_chat, add_to_group, create_group_chat, fetch_chats, remove_from_group, rename_group,
};
