//! Chat and message API integration tests
//!
//! Need a live database; run with `cargo test -- --ignored`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use roomcast::backend::server::Environment;
use serde_json::{json, Value};
use serial_test::serial;

use crate::common::{
    body_json, create_test_user, json_request, send, test_config, test_router, TestDatabase, TestUser,
};

fn authed_get(uri: &str, user: &TestUser) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Authorization", user.bearer())
        .body(Body::empty())
        .unwrap()
}

fn member_ids(chat: &Value) -> Vec<String> {
    chat["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["_id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_access_chat_is_idempotent() {
    let db = TestDatabase::new().await;
    let ada = create_test_user(db.pool(), "Ada", "ada@example.com", "pw").await.unwrap();
    let grace = create_test_user(db.pool(), "Grace", "grace@example.com", "pw").await.unwrap();
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let body = json!({ "userId": grace.id.to_string() });
    let first = body_json(send(&router, json_request("POST", "/api/chat", ada.auth(), body.clone())).await).await;
    assert_eq!(first["chatName"], "sender");
    assert_eq!(first["isGroupChat"], false);
    assert_eq!(member_ids(&first), vec![ada.id.to_string(), grace.id.to_string()]);

    // same chat from the other side
    let body = json!({ "userId": ada.id.to_string() });
    let second = body_json(send(&router, json_request("POST", "/api/chat", grace.auth(), body)).await).await;
    assert_eq!(second["_id"], first["_id"]);

    let response = send(&router, json_request("POST", "/api/chat", ada.auth(), json!({}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_group_chat_lifecycle() {
    let db = TestDatabase::new().await;
    let ada = create_test_user(db.pool(), "Ada", "ada@example.com", "pw").await.unwrap();
    let grace = create_test_user(db.pool(), "Grace", "grace@example.com", "pw").await.unwrap();
    let linus = create_test_user(db.pool(), "Linus", "linus@example.com", "pw").await.unwrap();
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    // too few users
    let users = json!([grace.id.to_string()]).to_string();
    let response = send(
        &router,
        json_request("POST", "/api/chat/group", ada.auth(), json!({ "name": "Team", "users": users })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "More than 2 users are required to form a group chat"
    );

    let users = json!([grace.id.to_string(), linus.id.to_string()]).to_string();
    let response = send(
        &router,
        json_request("POST", "/api/chat/group", ada.auth(), json!({ "name": "Team", "users": users })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let group = body_json(response).await;
    assert_eq!(group["isGroupChat"], true);
    assert_eq!(group["groupAdmin"]["_id"], ada.id.to_string());
    assert_eq!(
        member_ids(&group),
        vec![grace.id.to_string(), linus.id.to_string(), ada.id.to_string()]
    );
    let chat_id = group["_id"].as_str().unwrap().to_string();

    let renamed = body_json(
        send(
            &router,
            json_request("PUT", "/api/chat/rename", ada.auth(), json!({ "chatId": chat_id, "chatName": "Crew" })),
        )
        .await,
    )
    .await;
    assert_eq!(renamed["chatName"], "Crew");

    let removed = body_json(
        send(
            &router,
            json_request("PUT", "/api/chat/groupremove", ada.auth(), json!({ "chatId": chat_id, "userId": linus.id.to_string() })),
        )
        .await,
    )
    .await;
    assert_eq!(member_ids(&removed), vec![grace.id.to_string(), ada.id.to_string()]);

    let added = body_json(
        send(
            &router,
            json_request("PUT", "/api/chat/groupadd", ada.auth(), json!({ "chatId": chat_id, "userId": linus.id.to_string() })),
        )
        .await,
    )
    .await;
    assert_eq!(
        member_ids(&added),
        vec![grace.id.to_string(), ada.id.to_string(), linus.id.to_string()]
    );

    let missing = uuid::Uuid::new_v4().to_string();
    let response = send(
        &router,
        json_request("PUT", "/api/chat/rename", ada.auth(), json!({ "chatId": missing, "chatName": "X" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Chat Not Found");
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_messages_update_latest_and_order() {
    let db = TestDatabase::new().await;
    let ada = create_test_user(db.pool(), "Ada", "ada@example.com", "pw").await.unwrap();
    let grace = create_test_user(db.pool(), "Grace", "grace@example.com", "pw").await.unwrap();
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let chat = body_json(
        send(&router, json_request("POST", "/api/chat", ada.auth(), json!({ "userId": grace.id.to_string() }))).await,
    )
    .await;
    let chat_id = chat["_id"].as_str().unwrap().to_string();

    let response = send(&router, json_request("POST", "/api/message", ada.auth(), json!({ "chatId": chat_id }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid data passed into request");

    let first = body_json(
        send(&router, json_request("POST", "/api/message", ada.auth(), json!({ "content": "hi", "chatId": chat_id }))).await,
    )
    .await;
    assert_eq!(first["content"], "hi");
    assert_eq!(first["sender"]["_id"], ada.id.to_string());
    assert_eq!(first["chat"]["_id"], chat_id);
    // relay payload shape
    assert_eq!(member_ids(&first["chat"]), vec![ada.id.to_string(), grace.id.to_string()]);

    body_json(
        send(&router, json_request("POST", "/api/message", grace.auth(), json!({ "content": "hello", "chatId": chat_id }))).await,
    )
    .await;

    let messages = body_json(send(&router, authed_get(&format!("/api/message/{}", chat_id), &grace)).await).await;
    let contents: Vec<&str> = messages
        .as_array()
        .unwrap()
        .iter()
        .map(|message| message["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["hi", "hello"]);

    let chats = body_json(send(&router, authed_get("/api/chat", &ada)).await).await;
    assert_eq!(chats[0]["_id"], chat_id);
    assert_eq!(chats[0]["latestMessage"]["content"], "hello");
    assert_eq!(chats[0]["latestMessage"]["sender"]["_id"], grace.id.to_string());
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_group_create_with_unknown_user() {
    let db = TestDatabase::new().await;
    let ada = create_test_user(db.pool(), "Ada", "ada@example.com", "pw").await.unwrap();
    let grace = create_test_user(db.pool(), "Grace", "grace@example.com", "pw").await.unwrap();
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let users = json!([grace.id.to_string(), uuid::Uuid::new_v4().to_string()]).to_string();
    let response = send(
        &router,
        json_request("POST", "/api/chat/group", ada.auth(), json!({ "name": "Team", "users": users })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User Not Found");

    let chats = body_json(send(&router, authed_get("/api/chat", &ada)).await).await;
    assert_eq!(chats, json!([]));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_group_add_unknown_user() {
    let db = TestDatabase::new().await;
    let ada = create_test_user(db.pool(), "Ada", "ada@example.com", "pw").await.unwrap();
    let grace = create_test_user(db.pool(), "Grace", "grace@example.com", "pw").await.unwrap();
    let linus = create_test_user(db.pool(), "Linus", "linus@example.com", "pw").await.unwrap();
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let users = json!([grace.id.to_string(), linus.id.to_string()]).to_string();
    let group = body_json(
        send(
            &router,
            json_request("POST", "/api/chat/group", ada.auth(), json!({ "name": "Team", "users": users })),
        )
        .await,
    )
    .await;
    let chat_id = group["_id"].as_str().unwrap().to_string();

    let response = send(
        &router,
        json_request(
            "PUT",
            "/api/chat/groupadd",
            ada.auth(),
            json!({ "chatId": chat_id, "userId": uuid::Uuid::new_v4().to_string() }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User Not Found");
}
