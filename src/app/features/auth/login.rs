use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use validator::Validate;

use crate::app::{
    domain::UserRole,
    error::AppError,
    session::{self, CurrentUser},
    AppState,
};

use super::service;

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub password: String,
    pub role: UserRole,
}

/// POST /api/login — Validate a credential tuple and open a session.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<CurrentUser>), AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Invalid form data".to_string()))?;

    let user = service::authenticate(&request.username, &request.password, request.role)
        .ok_or_else(|| AppError::Auth("Invalid username or password".to_string()))?;

    let session_id = service::create_session(&state, user.clone())?;
    let jar = jar.add(session::session_cookie(session_id));

    Ok((StatusCode::OK, jar, Json(user)))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/login", post(submit))
}
