//! HTTP tests for the auth pipeline over the in-memory backend

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use uuid::Uuid;

use common::{create_photo, send, signup, test_app};

#[tokio::test]
async fn owner_update_succeeds_and_other_user_is_forbidden() {
    let app = test_app();
    let (u_id, u_token) = signup(&app, "u", "secret1").await;
    let (_, v_token) = signup(&app, "v", "secret2").await;

    let photo_id = create_photo(&app, &u_token, "original").await;
    let uri = format!("/api/photos/{photo_id}");
    let body = json!({ "title": "changed", "caption": "c", "photo_url": "https://img.example.com/p.jpg" });

    let (status, error) = send(&app, Method::PUT, &uri, Some(&v_token), Some(body.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"]["code"], "FORBIDDEN");

    let (status, photo) = send(&app, Method::PUT, &uri, Some(&u_token), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(photo["title"], "changed");
    assert_eq!(photo["user_id"], u_id.as_str());
}

#[tokio::test]
async fn missing_or_bad_token_is_unauthorized() {
    let app = test_app();

    let (status, error) = send(&app, Method::GET, "/api/photos", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(&app, Method::GET, "/api/photos", Some("forged.token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unauthenticated_caller_gets_401_not_404() {
    let app = test_app();
    let uri = format!("/api/photos/{}", Uuid::new_v4());
    let (status, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_or_invalid_resource_id_is_not_found() {
    let app = test_app();
    let (_, token) = signup(&app, "u", "secret1").await;

    let uri = format!("/api/comments/{}", Uuid::new_v4());
    let (status, error) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::DELETE, "/api/photos/42", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_owner_only() {
    let app = test_app();
    let (_, u_token) = signup(&app, "u", "secret1").await;
    let (_, v_token) = signup(&app, "v", "secret2").await;
    let photo_id = create_photo(&app, &u_token, "mine").await;
    let uri = format!("/api/photos/{photo_id}");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&v_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&u_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&u_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comments_follow_the_same_ownership_rule() {
    let app = test_app();
    let (_, u_token) = signup(&app, "u", "secret1").await;
    let (_, v_token) = signup(&app, "v", "secret2").await;
    let photo_id = create_photo(&app, &u_token, "shared").await;

    // anyone may comment on any photo
    let (status, comment) = send(
        &app,
        Method::POST,
        "/api/comments",
        Some(&v_token),
        Some(json!({ "message": "nice", "photo_id": photo_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/comments/{}", comment["id"].as_str().unwrap());

    // the photo owner does not own the comment
    let (status, _) = send(&app, Method::PUT, &uri, Some(&u_token), Some(json!({ "message": "edited" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, updated) = send(&app, Method::PUT, &uri, Some(&v_token), Some(json!({ "message": "edited" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "edited");
}

#[tokio::test]
async fn comment_on_missing_photo_is_not_found() {
    let app = test_app();
    let (_, token) = signup(&app, "u", "secret1").await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/comments",
        Some(&token),
        Some(json!({ "message": "hello", "photo_id": Uuid::new_v4() })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn social_media_list_is_scoped_to_caller() {
    let app = test_app();
    let (_, u_token) = signup(&app, "u", "secret1").await;
    let (_, v_token) = signup(&app, "v", "secret2").await;

    for (token, name) in [(&u_token, "u-site"), (&v_token, "v-site")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/socialmedias",
            Some(token.as_str()),
            Some(json!({ "name": name, "social_media_url": format!("https://{name}.example.com") })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = send(&app, Method::GET, "/api/socialmedias", Some(&u_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let links = list["social_medias"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["name"], "u-site");

    let uri = format!("/api/socialmedias/{}", links[0]["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&v_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
