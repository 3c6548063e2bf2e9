#![allow(dead_code)]

use axum::body::Body;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use testdesk::app::AppState;
use testdesk::create_router;
use tower::ServiceExt;

/// In-memory pool for tests. Capped at one connection: a pooled `:memory:`
/// database is per-connection, so a second connection would see an empty
/// schema.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_router(pool: SqlitePool) -> axum::Router {
    create_router(AppState::new(pool))
}

/// Build a JSON request, optionally authenticated with a cookie header.
pub fn json_request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Value,
) -> http::Request<Body> {
    let mut builder = http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a body-less request, optionally authenticated.
pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> http::Request<Body> {
    let mut builder = http::Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "expected JSON body, got error {}: {}",
            e,
            String::from_utf8_lossy(&bytes)
        )
    })
}

pub fn extract_session_id_from_cookie(set_cookie_header: &str) -> Option<&str> {
    set_cookie_header.split(';').next()?.strip_prefix("session_id=")
}

/// Log in with a credential tuple, return the cookie header for
/// authenticated requests.
pub async fn login_cookie(
    app: &axum::Router,
    username: &str,
    password: &str,
    role: &str,
) -> String {
    let request = json_request(
        "POST",
        "/api/login",
        None,
        json!({ "username": username, "password": password, "role": role }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), http::StatusCode::OK);

    let set_cookie = response
        .headers()
        .get("set-cookie")
        .unwrap()
        .to_str()
        .unwrap();
    let session_id = extract_session_id_from_cookie(set_cookie).unwrap();
    format!("session_id={}", session_id)
}

pub async fn admin_cookie(app: &axum::Router) -> String {
    login_cookie(app, "admin", "admin", "Administrator").await
}

pub async fn user_cookie(app: &axum::Router) -> String {
    login_cookie(app, "user01", "user01", "User").await
}

/// Create a folder through the API, returning its JSON record.
pub async fn create_folder(
    app: &axum::Router,
    cookie: &str,
    name: &str,
    parent_id: Option<&str>,
) -> Value {
    let request = json_request(
        "POST",
        "/api/folders",
        Some(cookie),
        json!({ "name": name, "parent_id": parent_id }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), http::StatusCode::CREATED);
    body_json(response).await
}

/// Create a master script through the API, returning its JSON record.
pub async fn create_script(
    app: &axum::Router,
    cookie: &str,
    label: &str,
    folder_id: &str,
) -> Value {
    let request = json_request(
        "POST",
        "/api/scripts",
        Some(cookie),
        json!({
            "script_id": label,
            "short_description": format!("{} regression check", label),
            "folder_id": folder_id,
            "test_environment": "Online",
            "test_type": "Positive",
            "script_details": "1. Do the thing\n2. Verify the result",
        }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), http::StatusCode::CREATED);
    body_json(response).await
}

/// Create a project through the API, returning its JSON record.
pub async fn create_project(app: &axum::Router, cookie: &str, name: &str) -> Value {
    let request = json_request(
        "POST",
        "/api/projects",
        Some(cookie),
        json!({ "name": name }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), http::StatusCode::CREATED);
    body_json(response).await
}

/// Import a script into a project, returning the imported copy's JSON.
pub async fn import_script(
    app: &axum::Router,
    cookie: &str,
    project_id: &str,
    script_id: &str,
) -> Value {
    let request = json_request(
        "POST",
        &format!("/api/projects/{}/imports", project_id),
        Some(cookie),
        json!({ "script_id": script_id }),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), http::StatusCode::CREATED);
    body_json(response).await
}
