use axum::{routing::get, Json, Router};

use crate::app::{
    session::{ApiSession, CurrentUser},
    AppState,
};

/// GET /api/session — The authenticated user for this session.
pub async fn show(ApiSession(user): ApiSession) -> Json<CurrentUser> {
    Json(user)
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/session", get(show))
}
