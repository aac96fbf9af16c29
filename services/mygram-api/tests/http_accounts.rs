//! HTTP tests for registration, login and account management

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{create_photo, send, signup, test_app};

fn registration(name: &str, password: &str) -> serde_json::Value {
    json!({
        "username": name,
        "email": format!("{name}@example.com"),
        "password": password,
        "age": 20,
    })
}

#[tokio::test]
async fn register_returns_user_without_password() {
    let app = test_app();
    let (status, user) = send(&app, Method::POST, "/register", None, Some(registration("alice", "secret1"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "alice@example.com");
    assert!(user.get("password").is_none());
}

#[tokio::test]
async fn register_validation() {
    let app = test_app();

    let (status, error) = send(&app, Method::POST, "/register", None, Some(registration("weak", "12345"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"]["code"], "WEAK_CREDENTIAL");

    let mut bad_email = registration("bob", "secret1");
    bad_email["email"] = json!("not-an-email");
    let (status, _) = send(&app, Method::POST, "/register", None, Some(bad_email)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut too_young = registration("kid", "secret1");
    too_young["age"] = json!(7);
    let (status, _) = send(&app, Method::POST, "/register", None, Some(too_young)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn incomplete_bodies_are_bad_requests() {
    let app = test_app();

    let (status, error) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "username": "alice", "email": "alice@example.com", "age": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "BAD_REQUEST");

    let (status, error) = send(&app, Method::POST, "/login", None, Some(json!(["not", "an", "object"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "BAD_REQUEST");

    let (_, token) = signup(&app, "bob", "secret1").await;
    let (status, error) = send(&app, Method::POST, "/api/photos", Some(&token), Some(json!({ "title": "t" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"]["code"], "BAD_REQUEST");
    assert!(error["error"]["message"].as_str().unwrap().contains("photo_url"));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app();
    signup(&app, "alice", "secret1").await;

    let (status, error) = send(&app, Method::POST, "/register", None, Some(registration("alice", "secret1"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn login_failures_look_the_same() {
    let app = test_app();
    signup(&app, "alice", "secret1").await;

    let (s1, wrong_password) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "alice@example.com", "password": "secret2" })),
    )
    .await;
    let (s2, unknown_email) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "secret1" })),
    )
    .await;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn update_account_changes_login() {
    let app = test_app();
    let (_, token) = signup(&app, "alice", "secret1").await;

    let (status, user) = send(
        &app,
        Method::PUT,
        "/api/users",
        Some(&token),
        Some(json!({ "email": "alice2@example.com", "password": "secret9" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["email"], "alice2@example.com");

    let (status, _) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "alice2@example.com", "password": "secret9" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_account_removes_owned_photos() {
    let app = test_app();
    let (_, alice) = signup(&app, "alice", "secret1").await;
    let (_, bob) = signup(&app, "bob", "secret2").await;
    create_photo(&app, &alice, "alice's").await;
    create_photo(&app, &bob, "bob's").await;

    let (status, _) = send(&app, Method::DELETE, "/api/users", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, photos) = send(&app, Method::GET, "/api/photos", Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);
    let photos = photos.as_array().unwrap();
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["title"], "bob's");
    assert_eq!(photos[0]["user"]["username"], "bob");

    // the old token still verifies but the account is gone
    let (status, _) = send(&app, Method::DELETE, "/api/users", Some(&alice), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleted_account_token_cannot_create() {
    let app = test_app();
    let (_, alice) = signup(&app, "alice", "secret1").await;
    let (_, bob) = signup(&app, "bob", "secret2").await;
    let photo_id = create_photo(&app, &bob, "bob's").await;

    let (status, _) = send(&app, Method::DELETE, "/api/users", Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);

    let creates = [
        (
            "/api/photos",
            json!({ "title": "t", "caption": "", "photo_url": "https://img.example.com/p.jpg" }),
        ),
        (
            "/api/socialmedias",
            json!({ "name": "site", "social_media_url": "https://alice.example.com" }),
        ),
        ("/api/comments", json!({ "message": "hi", "photo_id": photo_id })),
    ];
    for (uri, body) in creates {
        let (status, error) = send(&app, Method::POST, uri, Some(&alice), Some(body)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}: {error}");
        assert_eq!(error["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn health_endpoints() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["checks"]["database"]["backend"], "memory");
}
