//! Backend Module
//!
//! This module contains all server-side code for the roomcast chat backend:
//! an Axum HTTP server with the REST API and the real-time relay.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Users, passwords, JWT tokens and the `/api/user` handlers
//! - **`chat`** - One-to-one and group chats (`/api/chat`)
//! - **`messaging`** - Messages (`/api/message`)
//! - **`realtime`** - Room registry and the WebSocket relay
//! - **`middleware`** - The `protect` authentication middleware
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and users
//! ├── chat/           - Chats
//! ├── messaging/      - Messages
//! ├── realtime/       - Relay
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the `PgPool`, the relay `RoomRegistry` and the
//! `ServerConfig`; handlers extract the part they need through `FromRef`.

pub mod server;
pub mod routes;
pub mod auth;
pub mod chat;
pub mod messaging;
pub mod realtime;
pub mod middleware;
pub mod error;
