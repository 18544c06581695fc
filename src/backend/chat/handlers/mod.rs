//! Chat HTTP Handlers
//!
//! Handlers for the `/api/chat` route group. All of them run behind the
//! `protect` middleware.
//!
//! | Method | Path                     | Handler               |
//! |--------|--------------------------|-----------------------|
//! | POST   | `/api/chat`              | [`access_chat`]       |
//! | GET    | `/api/chat`              | [`fetch_chats`]       |
//! | POST   | `/api/chat/group`        | [`create_group_chat`] |
//! | PUT    | `/api/chat/rename`       | [`rename_group`]      |
//! | PUT    | `/api/chat/groupadd`     | [`add_to_group`]      |
//! | PUT    | `/api/chat/groupremove`  | [`remove_from_group`] |

pub mod access;
pub mod group;
pub mod types;

pub use access::{access_chat, fetch_chats};
pub use group::{add_to_group, create_group_chat, remove_from_group, rename_group};
