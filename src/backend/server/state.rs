/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The PostgreSQL connection pool
 * - The relay room registry
 * - The server configuration
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use sqlx::PgPool;
 *
 * async fn handler(State(pool): State<PgPool>) {
 *     // query with pool
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::realtime::RoomRegistry;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
///
/// All fields are cheap to clone: the pool and the registry are handles to
/// shared internals, the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: PgPool,
    /// Connection and room registry for the relay
    pub relay: RoomRegistry,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db_pool: PgPool, config: ServerConfig) -> Self {
        Self {
            db_pool,
            relay: RoomRegistry::new(),
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for RoomRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.relay.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
