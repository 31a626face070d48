//! # Integration Tests
//!
//! Full flows across registration, login and the gated posts collection.

use super::*;
use lib_core::dto::{DeleteResponse, PostInfo, PostsResponse};
use serde_json::json;

#[tokio::test]
async fn test_register_login_then_access_gated_route() {
    let app = test_app(setup_test_db().await);

    // Register, then the same email again
    register_ann(&app).await;
    let (status, _, body) = post_json(
        &app,
        "/api/user/register",
        json!({"name": "Ann", "email": "ann@x.com", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse::<ErrorResponse>(&body).code, "DuplicateKey");

    // Login and use the token
    let token = login_ann(&app).await;
    let (status, _, body) = send(&app, "GET", "/api/posts", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(parse::<PostsResponse>(&body).posts.is_empty());

    // Same route without the header
    let (status, _, body) = send(&app, "GET", "/api/posts", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Access denied, no token provided");
}

#[tokio::test]
async fn test_gate_rejects_tampered_token() {
    let app = test_app(setup_test_db().await);
    register_ann(&app).await;
    let token = login_ann(&app).await;

    // Swap one character in the middle of the signature
    let at = token.rfind('.').unwrap() + 5;
    let mut tampered = token.into_bytes();
    tampered[at] = if tampered[at] == b'A' { b'B' } else { b'A' };
    let tampered = String::from_utf8(tampered).unwrap();

    let (status, _, body) = send(&app, "GET", "/api/posts", None, Some(&tampered)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Invalid token");
}

#[tokio::test]
async fn test_gate_blocks_writes_without_token() {
    let pool = setup_test_db().await;
    let app = test_app(pool.clone());

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/posts",
        Some(json!({"title": "t", "description": "d"}).to_string()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "Access denied, no token provided");
    assert!(lib_core::model::store::PostRepository::list(&pool)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_posts_crud_through_gate() {
    let app = test_app(setup_test_db().await);
    let user_id = register_ann(&app).await;
    let token = login_ann(&app).await;

    // Create
    let (status, _, body) = send(
        &app,
        "POST",
        "/api/posts",
        Some(json!({"title": "First", "description": "Hello"}).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created: PostInfo = parse(&body);
    assert_eq!(created.title, "First");
    assert_eq!(created.author_id, user_id);

    // Get
    let uri = format!("/api/posts/{}", created.id);
    let (status, _, body) = send(&app, "GET", &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<PostInfo>(&body), created);

    // Update title
    let (status, _, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({"title": "Renamed"}).to_string()),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: PostInfo = parse(&body);
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, "Hello");

    // List
    let (_, _, body) = send(&app, "GET", "/api/posts", None, Some(&token)).await;
    assert_eq!(parse::<PostsResponse>(&body).posts, vec![updated]);

    // Delete, then it is gone
    let (status, _, body) = send(&app, "DELETE", &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<DeleteResponse>(&body).deleted, 1);

    let (status, _, body) = send(&app, "GET", &uri, None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_of(&body), "Post not found");
}

#[tokio::test]
async fn test_token_for_unknown_user_cannot_create_posts() {
    let pool = setup_test_db().await;
    let app = test_app(pool.clone());
    let token = lib_auth::TokenIssuer::new(TEST_SECRET, 24)
        .unwrap()
        .issue("ghost")
        .unwrap();

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/posts",
        Some(json!({"title": "t", "description": "d"}).to_string()),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = parse(&body);
    assert_eq!(error.error, "Invalid token");
    assert_eq!(error.code, "Authentication");
    assert!(lib_core::model::store::PostRepository::list(&pool)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_create_post_validation() {
    let app = test_app(setup_test_db().await);
    register_ann(&app).await;
    let token = login_ann(&app).await;

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/posts",
        Some(json!({"description": "no title"}).to_string()),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_of(&body), "\"title\" is required");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = test_app(setup_test_db().await);

    let (status, headers, _) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app(setup_test_db().await);

    let (status, _, _) = send(&app, "GET", "/api/nothing", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
