use axum::{
    extract::State,
    http::StatusCode,
    routing::post, Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::app::{
    error::AppError,
    session,
    AppState,
};

use super::service;

/// POST /api/logout — Log out the current user.
pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    if let Some(cookie) = jar.get(session::SESSION_COOKIE) {
        service::destroy_session(&state, cookie.value())?;
    }

    let jar = jar.add(session::clear_session_cookie());

    Ok((jar, StatusCode::NO_CONTENT))
}

/// Logout routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/logout", post(submit))
}
