//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - The `protect` middleware guarding chat, message and user search routes
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use roomcast::backend::middleware::protect;
//!
//! let protected = routes.route_layer(from_fn_with_state(state.clone(), protect));
//! ```

pub mod auth;

pub use auth::{bearer_token, protect, AuthUser, AuthenticatedUser};
