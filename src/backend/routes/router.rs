/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. API routes (`/api/user`, `/api/chat`, `/api/message`)
 * 2. Relay socket (`/ws`)
 * 3. Root: the static bundle in production, a liveness string otherwise
 * 4. Fallback: JSON 404 (development only; production falls back to `index.html`)
 */

use axum::{
    http::{header, HeaderValue, Method, Uri},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::realtime::handle_relay_socket;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Body of `GET /` outside production
pub const API_RUNNING: &str = "API is running...";

async fn api_running() -> &'static str {
    API_RUNNING
}

/// JSON 404 for unmatched routes
pub async fn not_found(uri: Uri) -> BackendError {
    BackendError::not_found(format!("Not Found - {}", uri.path()))
}

/// Build the CORS layer for the configured origin
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = if config.cors_origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(&config.cors_origin) {
            Ok(origin) => AllowOrigin::exact(origin),
            Err(e) => {
                tracing::warn!("[Server] Unusable CORS_ORIGIN {:?}: {}", config.cors_origin, e);
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the pool, relay registry and config
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state)
        .route("/ws", get(handle_relay_socket));

    let router = if app_state.config.is_production() {
        let static_dir = &app_state.config.static_dir;
        tracing::info!("[Server] Serving static bundle from {}", static_dir.display());
        let bundle = ServeDir::new(static_dir)
            .fallback(ServeFile::new(static_dir.join("index.html")));
        router.fallback_service(bundle)
    } else {
        router.route("/", get(api_running)).fallback(not_found)
    };

    router
        .layer(cors_layer(&app_state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
