//! User API integration tests
//!
//! Need a live database; run with `cargo test -- --ignored`.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use roomcast::backend::server::Environment;
use serde_json::json;
use serial_test::serial;

use crate::common::{body_json, create_test_user, json_request, send, test_config, test_router, TestDatabase};

#[tokio::test]
#[serial]
#[ignore]
async fn test_register_success() {
    let db = TestDatabase::new().await;
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let request = json_request(
        "POST",
        "/api/user",
        None,
        json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter22" }),
    );
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["isAdmin"], false);
    assert!(body["_id"].is_string());
    assert!(body["pic"].is_string());
    assert!(body["token"].is_string());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_register_duplicate_email() {
    let db = TestDatabase::new().await;
    create_test_user(db.pool(), "Ada", "ada@example.com", "hunter22").await.unwrap();
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let request = json_request(
        "POST",
        "/api/user",
        None,
        json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter22" }),
    );
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "User already exists");
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_login() {
    let db = TestDatabase::new().await;
    let user = create_test_user(db.pool(), "Ada", "ada@example.com", "hunter22").await.unwrap();
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let request = json_request(
        "POST",
        "/api/user/login",
        None,
        json!({ "email": user.email, "password": user.password }),
    );
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["_id"], user.id.to_string());
    assert!(body["token"].is_string());

    let request = json_request(
        "POST",
        "/api/user/login",
        None,
        json!({ "email": "ada@example.com", "password": "wrong" }),
    );
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Invalid Email or Password");
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_search_excludes_caller() {
    let db = TestDatabase::new().await;
    let ada = create_test_user(db.pool(), "Ada", "ada@example.com", "hunter22").await.unwrap();
    let grace = create_test_user(db.pool(), "Grace", "grace@example.com", "hunter22").await.unwrap();
    create_test_user(db.pool(), "Linus", "linus@example.com", "hunter22").await.unwrap();
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let request = axum::http::Request::builder()
        .uri("/api/user?search=a")
        .header("Authorization", ada.bearer())
        .body(axum::body::Body::empty())
        .unwrap();
    let response = send(&router, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["_id"].as_str().unwrap())
        .collect();
    // "a" matches every email domain; the caller is left out
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&grace.id.to_string().as_str()));
    assert!(!ids.contains(&ada.id.to_string().as_str()));
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_concurrent_registration_same_email() {
    let db = TestDatabase::new().await;
    let router = test_router(db.pool().clone(), test_config(Environment::Development));

    let register = || {
        json_request(
            "POST",
            "/api/user",
            None,
            json!({ "name": "Ada", "email": "ada@example.com", "password": "hunter22" }),
        )
    };
    let (first, second) = tokio::join!(send(&router, register()), send(&router, register()));

    let mut statuses = vec![first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    let rejected = if first.status() == StatusCode::BAD_REQUEST { first } else { second };
    assert_eq!(body_json(rejected).await["message"], "User already exists");
}
