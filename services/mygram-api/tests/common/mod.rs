//! Common test utilities for mygram-api integration tests

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use mygram_api::{build_router, AppState, Config};
use mygram_auth_core::{Argon2Params, AuthConfig};
use mygram_db::Repositories;

pub const TEST_SECRET: &str = "http-test-secret-that-is-at-least-32-bytes";

/// Router over a fresh in-memory backend with a cheap Argon2 work factor
pub fn test_app() -> Router {
    let auth = AuthConfig::try_new(TEST_SECRET)
        .expect("test secret is long enough")
        .with_argon2_params(Argon2Params {
            m_cost: 1024,
            t_cost: 1,
            p_cost: 1,
        });
    let state = AppState::new(Repositories::in_memory(), None, Config::new(auth))
        .expect("valid test state");
    build_router(state, None)
}

/// Send one request and return the status and decoded JSON body (Null if empty)
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register `name` and log in, returning the user id and bearer token
#[allow(dead_code)]
pub async fn signup(app: &Router, name: &str, password: &str) -> (String, String) {
    let (status, user) = send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({
            "username": name,
            "email": format!("{name}@example.com"),
            "password": password,
            "age": 20,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register {name}: {user}");

    let (status, login) = send(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": format!("{name}@example.com"), "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login {name}: {login}");

    (
        user["id"].as_str().unwrap().to_string(),
        login["token"].as_str().unwrap().to_string(),
    )
}

/// Create a photo as the token's owner and return its id
#[allow(dead_code)]
pub async fn create_photo(app: &Router, token: &str, title: &str) -> String {
    let (status, photo) = send(
        app,
        Method::POST,
        "/api/photos",
        Some(token),
        Some(json!({ "title": title, "caption": "", "photo_url": "https://img.example.com/p.jpg" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create photo: {photo}");
    photo["id"].as_str().unwrap().to_string()
}
