/**
 * Relay Socket Handler
 *
 * This module implements the WebSocket endpoint (`GET /ws`) that carries
 * relay events between clients and the room registry.
 *
 * # Framing
 *
 * Each text frame holds one JSON event: `{"event": "<name>", "data": ...}`.
 * Frames that do not decode as a known client event are logged and skipped;
 * the connection stays open.
 *
 * # Connection Management
 *
 * - The server pings every `ping_interval`
 * - Any inbound frame (including pongs) resets the idle timer
 * - A connection idle for `ping_timeout` is sent a Close frame and dropped
 * - On close the connection is removed from every room
 */

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header::ORIGIN, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::time::Instant;

use crate::backend::realtime::broadcast::{ConnectionId, RoomRegistry};
use crate::backend::realtime::relay::handle_client_event;
use crate::backend::server::config::ServerConfig;
use crate::shared::{ClientEvent, SharedError};

/// Timing knobs for one relay connection
#[derive(Debug, Clone, Copy)]
pub struct Heartbeat {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Heartbeat {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            interval: config.ping_interval,
            timeout: config.ping_timeout,
        }
    }
}

/// Handle relay connection request (GET /ws)
///
/// Rejects browser connections from an origin other than the configured one
/// with `403 Forbidden`; clients that send no `Origin` header are accepted.
pub async fn handle_relay_socket(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(registry): State<RoomRegistry>,
    State(config): State<Arc<ServerConfig>>,
) -> Response {
    if !origin_allowed(&headers, &config.cors_origin) {
        tracing::warn!("[Relay] Rejected connection from origin {:?}", headers.get(ORIGIN));
        return StatusCode::FORBIDDEN.into_response();
    }

    let heartbeat = Heartbeat::from_config(&config);
    ws.on_upgrade(move |socket| run_connection(socket, registry, heartbeat))
}

fn origin_allowed(headers: &HeaderMap, allowed: &str) -> bool {
    if allowed == "*" {
        return true;
    }
    match headers.get(ORIGIN).and_then(|value| value.to_str().ok()) {
        Some(origin) => origin.trim_end_matches('/') == allowed.trim_end_matches('/'),
        None => true,
    }
}

/// Drive one relay connection until the client leaves or goes idle
pub async fn run_connection(mut socket: WebSocket, registry: RoomRegistry, heartbeat: Heartbeat) {
    let (conn, mut outbound) = registry.connect().await;
    tracing::info!("[Relay] Connected {}", conn);

    let mut pings = tokio::time::interval_at(Instant::now() + heartbeat.interval, heartbeat.interval);
    let idle = tokio::time::sleep(heartbeat.timeout);
    tokio::pin!(idle);

    loop {
        tokio::select! {
            incoming = socket.recv() => {
                let frame = match incoming {
                    Some(Ok(frame)) => frame,
                    Some(Err(e)) => {
                        tracing::warn!("[Relay] Socket error on {}: {}", conn, e);
                        break;
                    }
                    None => break,
                };
                idle.as_mut().reset(Instant::now() + heartbeat.timeout);

                match frame {
                    Message::Text(text) => dispatch_frame(&registry, conn, text.as_str()).await,
                    Message::Close(_) => break,
                    Message::Binary(_) => {
                        tracing::debug!("[Relay] Ignoring binary frame from {}", conn);
                    }
                    Message::Ping(_) | Message::Pong(_) => {}
                }
            }
            event = outbound.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!("[Relay] Failed to serialize {}: {:?}", event.name(), e);
                        continue;
                    }
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            _ = pings.tick() => {
                if socket.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
            _ = &mut idle => {
                tracing::info!("[Relay] Ping timeout on {}", conn);
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
        }
    }

    registry.disconnect(conn).await;
    tracing::info!("[Relay] Disconnected {}", conn);
}

async fn dispatch_frame(registry: &RoomRegistry, conn: ConnectionId, text: &str) {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => {
            handle_client_event(registry, conn, event).await;
        }
        Err(e) => {
            tracing::warn!("[Relay] Ignoring frame from {}: {}", conn, SharedError::from(e));
        }
    }
}
