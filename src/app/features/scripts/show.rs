use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::app::{
    db::{self, scripts::Script},
    error::AppError,
    session::AdminSession,
    AppState,
};

/// GET /api/scripts/:id — One master script.
pub async fn show(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Script>, AppError> {
    let script = db::scripts::find_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Script not found".to_string()))?;

    Ok(Json(script))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/scripts/:id", get(show))
}
