mod common;

use serde_json::json;
use tower::ServiceExt;

use crate::common::*;

#[tokio::test]
async fn login_accepts_the_admin_tuple() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);

    let request = json_request(
        "POST",
        "/api/login",
        None,
        json!({ "username": "admin", "password": "admin", "role": "Administrator" }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), http::StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "admin");
    assert_eq!(body["role"], "Administrator");
}

#[tokio::test]
async fn login_accepts_the_user_tuple() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);

    let request = json_request(
        "POST",
        "/api/login",
        None,
        json!({ "username": "user01", "password": "user01", "role": "User" }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), http::StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], "User");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);

    let request = json_request(
        "POST",
        "/api/login",
        None,
        json!({ "username": "admin", "password": "nope", "role": "Administrator" }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_role_mismatch() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);

    // Right username and password, wrong role selection.
    let request = json_request(
        "POST",
        "/api/login",
        None,
        json!({ "username": "admin", "password": "admin", "role": "User" }),
    );
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_endpoint_returns_current_user() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let cookie = admin_cookie(&app).await;

    let response = app
        .oneshot(empty_request("GET", "/api/session", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), http::StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "admin");
}

#[tokio::test]
async fn unauthenticated_request_is_rejected() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);

    let response = app
        .oneshot(empty_request("GET", "/api/folders", None))
        .await
        .unwrap();

    assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_cannot_reach_admin_surface() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let cookie = user_cookie(&app).await;

    let response = app
        .oneshot(empty_request("GET", "/api/folders", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_cannot_reach_user_surface() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let cookie = admin_cookie(&app).await;

    let response = app
        .oneshot(empty_request("GET", "/api/projects", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let pool = common::test_pool().await;
    let app = common::test_router(pool);
    let cookie = admin_cookie(&app).await;

    let response = app
        .clone()
        .oneshot(empty_request("POST", "/api/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::NO_CONTENT);

    // The old session id no longer authenticates.
    let response = app
        .oneshot(empty_request("GET", "/api/session", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), http::StatusCode::UNAUTHORIZED);
}
