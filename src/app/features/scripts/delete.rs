use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::delete,
    Router,
};

use crate::app::{db, error::AppError, session::AdminSession, AppState};

/// DELETE /api/scripts/:id — Remove a master script from the library.
/// Copies already imported into projects are snapshots and stay intact.
pub async fn remove(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut conn = state.db.acquire().await?;
    db::scripts::delete(&mut conn, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/scripts/:id", delete(remove))
}
