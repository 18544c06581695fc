/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL and run migrations
 * 2. Create the application state
 * 3. Create and configure the router
 *
 * A database failure is returned to the caller; the binary treats it as fatal.
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns [`ConfigError`] if the database is unreachable or a migration fails.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, ConfigError> {
    tracing::info!("[Server] Initializing roomcast backend ({:?})", config.environment);

    let db_pool = load_database(&config).await?;
    tracing::info!("[Server] Database connected");

    let app_state = AppState::new(db_pool, config);
    let app = create_router(app_state);

    tracing::info!("[Server] Router configured");
    Ok(app)
}
