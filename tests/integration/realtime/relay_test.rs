//! Relay integration tests
//!
//! Each test serves the full router on an ephemeral port and talks to
//! `/ws` with tokio-tungstenite clients.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use pretty_assertions::assert_eq;
use roomcast::backend::server::{Environment, ServerConfig};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::common::{lazy_pool, spawn_server, test_config, test_router};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start() -> SocketAddr {
    spawn_server(test_router(lazy_pool(), test_config(Environment::Development))).await
}

async fn connect(addr: SocketAddr) -> Client {
    let (client, _) = connect_async(format!("ws://{}/ws", addr))
        .await
        .expect("Failed to open relay socket");
    client
}

async fn emit(client: &mut Client, event: &str, data: Value) {
    let frame = json!({ "event": event, "data": data }).to_string();
    client.send(Message::text(frame)).await.expect("Failed to send frame");
}

/// Next JSON text frame, skipping control frames
async fn next_event(client: &mut Client) -> Value {
    timeout(Duration::from_secs(2), async {
        loop {
            match client.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str::<Value>(text.as_str()).expect("Frame is not JSON");
                }
                Some(Ok(_)) => continue,
                other => panic!("Socket ended: {:?}", other),
            }
        }
    })
    .await
    .expect("Timed out waiting for event")
}

/// Assert no text frame arrives within a short window
async fn assert_silent(client: &mut Client) {
    let result = timeout(Duration::from_millis(200), async {
        loop {
            match client.next().await {
                Some(Ok(Message::Text(text))) => return text.to_string(),
                Some(Ok(_)) => continue,
                other => panic!("Socket ended: {:?}", other),
            }
        }
    })
    .await;
    assert!(result.is_err(), "Unexpected event: {:?}", result);
}

/// Send `setup` and wait for `connected`
///
/// Frames on one connection are handled in order, so once `connected`
/// arrives every earlier frame from this client has been applied.
async fn setup(client: &mut Client, user_id: &str) {
    emit(client, "setup", json!({ "_id": user_id, "name": user_id })).await;
    assert_eq!(next_event(client).await, json!({ "event": "connected" }));
}

fn new_message(sender: &str, users: &[&str]) -> Value {
    json!({
        "_id": "m1",
        "content": "hello",
        "sender": { "_id": sender, "name": sender },
        "chat": {
            "_id": "c1",
            "users": users.iter().map(|id| json!({ "_id": id })).collect::<Vec<_>>(),
        },
    })
}

#[tokio::test]
async fn test_setup_acknowledged() {
    let addr = start().await;
    let mut ada = connect(addr).await;

    emit(&mut ada, "setup", json!("ada")).await;
    assert_eq!(next_event(&mut ada).await, json!({ "event": "connected" }));
}

#[tokio::test]
async fn test_new_message_reaches_other_participants() {
    let addr = start().await;
    let mut ada = connect(addr).await;
    let mut grace = connect(addr).await;
    let mut linus = connect(addr).await;
    setup(&mut ada, "ada").await;
    setup(&mut grace, "grace").await;
    setup(&mut linus, "linus").await;

    let payload = new_message("ada", &["ada", "grace"]);
    emit(&mut ada, "new message", payload.clone()).await;

    assert_eq!(
        next_event(&mut grace).await,
        json!({ "event": "message received", "data": payload })
    );
    assert_silent(&mut ada).await;
    assert_silent(&mut linus).await;
}

#[tokio::test]
async fn test_typing_excludes_caller() {
    let addr = start().await;
    let mut ada = connect(addr).await;
    let mut grace = connect(addr).await;
    setup(&mut ada, "ada").await;
    setup(&mut grace, "grace").await;

    emit(&mut ada, "join chat", json!("c1")).await;
    emit(&mut grace, "join chat", json!("c1")).await;
    setup(&mut ada, "ada").await;
    setup(&mut grace, "grace").await;

    emit(&mut ada, "typing", json!("c1")).await;
    assert_eq!(next_event(&mut grace).await, json!({ "event": "typing" }));

    emit(&mut ada, "stop typing", json!("c1")).await;
    assert_eq!(next_event(&mut grace).await, json!({ "event": "stop typing" }));

    assert_silent(&mut ada).await;
}

#[tokio::test]
async fn test_leave_chat_stops_delivery() {
    let addr = start().await;
    let mut ada = connect(addr).await;
    let mut grace = connect(addr).await;
    setup(&mut ada, "ada").await;
    setup(&mut grace, "grace").await;

    emit(&mut grace, "join chat", json!("c1")).await;
    emit(&mut grace, "leave chat", json!("c1")).await;
    setup(&mut grace, "grace").await;

    emit(&mut ada, "typing", json!("c1")).await;
    assert_silent(&mut grace).await;
}

#[tokio::test]
async fn test_malformed_frames_keep_connection_open() {
    let addr = start().await;
    let mut ada = connect(addr).await;
    let mut grace = connect(addr).await;
    setup(&mut grace, "grace").await;

    ada.send(Message::text("not json")).await.unwrap();
    emit(&mut ada, "unknown event", json!(1)).await;
    // chat.users missing
    emit(&mut ada, "new message", json!({ "sender": { "_id": "ada" }, "chat": {} })).await;

    setup(&mut ada, "ada").await;
    assert_silent(&mut grace).await;
}

#[tokio::test]
async fn test_disconnect_removes_connection() {
    let addr = start().await;
    let mut ada = connect(addr).await;
    let mut grace = connect(addr).await;
    setup(&mut ada, "ada").await;
    setup(&mut grace, "grace").await;

    grace.close(None).await.unwrap();
    drop(grace);

    // Delivery to a departed user is silently skipped
    emit(&mut ada, "new message", new_message("ada", &["ada", "grace"])).await;
    setup(&mut ada, "ada").await;
}

#[tokio::test]
async fn test_foreign_origin_rejected() {
    let config = ServerConfig::builder()
        .cors_origin("http://localhost:3000")
        .build()
        .unwrap();
    let addr = spawn_server(test_router(lazy_pool(), config)).await;

    let mut request = format!("ws://{}/ws", addr).into_client_request().unwrap();
    request
        .headers_mut()
        .insert("Origin", "http://evil.example".parse().unwrap());

    match connect_async(request).await {
        Err(WsError::Http(response)) => assert_eq!(response.status().as_u16(), 403),
        other => panic!("Expected HTTP 403, got {:?}", other.map(|_| ())),
    }

    let mut request = format!("ws://{}/ws", addr).into_client_request().unwrap();
    request
        .headers_mut()
        .insert("Origin", "http://localhost:3000".parse().unwrap());
    assert!(connect_async(request).await.is_ok());
}

#[tokio::test]
async fn test_idle_connection_pinged_then_closed() {
    let config = ServerConfig::builder()
        .cors_origin("*")
        .ping_interval(Duration::from_millis(100))
        .ping_timeout(Duration::from_millis(300))
        .build()
        .unwrap();
    let addr = spawn_server(test_router(lazy_pool(), config)).await;
    let mut client = connect(addr).await;

    // nothing is read, so no pong goes back
    tokio::time::sleep(Duration::from_millis(500)).await;

    let mut pings = 0;
    let ended = timeout(Duration::from_secs(2), async {
        loop {
            match client.next().await {
                Some(Ok(Message::Ping(_))) => pings += 1,
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await;

    assert!(ended.is_ok(), "Idle socket was not closed");
    assert!(pings >= 1, "No heartbeat pings before the close");
}
