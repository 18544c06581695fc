//! Roomcast - Real-Time Chat Backend
//!
//! Roomcast serves a small chat application: a REST API for users, chats and
//! messages backed by PostgreSQL, and a WebSocket relay that fans chat events
//! out to the rooms clients have joined.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared by the relay and its clients
//!   - Client and server relay events
//!   - The `new message` payload view
//!   - Error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server and router
//!   - Authentication, chats and messages
//!   - The room registry and relay socket
//!
//! # Usage
//!
//! ```rust,no_run
//! use roomcast::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Relay Protocol
//!
//! Frames are JSON text objects `{"event": <name>, "data": <payload>}`.
//! Clients send `setup`, `join chat`, `leave chat`, `typing`, `stop typing`
//! and `new message`; the server sends `connected`, `typing`, `stop typing`
//! and `message received`. See [`backend::realtime`].
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - Custom error types in `shared::error` and `backend::error`
//! - Failed requests answer with `{"message": ..., "status": ...}`

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
