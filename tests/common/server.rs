//! Router and listener helpers

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use roomcast::backend::routes::create_router;
use roomcast::backend::server::{AppState, Environment, ServerConfig};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret";

/// Development config pointing at the test database
pub fn test_config(environment: Environment) -> ServerConfig {
    ServerConfig::builder()
        .database_url(crate::common::database::test_database_url())
        .jwt_secret(TEST_SECRET)
        .environment(environment)
        .cors_origin("*")
        .ping_interval(Duration::from_secs(25))
        .ping_timeout(Duration::from_secs(60))
        .build()
        .expect("Invalid test config")
}

/// Router over an explicit pool and config
pub fn test_router(pool: PgPool, config: ServerConfig) -> Router {
    create_router(AppState::new(pool, config))
}

/// Serve `router` on an ephemeral port
pub async fn spawn_server(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });

    addr
}

/// Send one request through the router
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router
        .clone()
        .oneshot(request)
        .await
        .expect("Router is infallible")
}

/// Build a JSON request, with a bearer header when `authorization` is set
pub fn json_request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(authorization) = authorization {
        builder = builder.header(header::AUTHORIZATION, authorization);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("Invalid test request")
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Read a response body as text
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
