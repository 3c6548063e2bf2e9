use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::app::{
    db::{self, folders, scripts::Script},
    error::AppError,
    session::AdminSession,
    AppState,
};

/// Query parameters for the script listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub folder_id: Option<String>,
}

/// A script annotated with its display folder path. A dangling folder
/// reference renders as "Unknown Folder" rather than failing.
#[derive(Debug, Serialize)]
pub struct ScriptResponse {
    #[serde(flatten)]
    pub script: Script,
    pub folder_path: String,
}

/// GET /api/scripts — Every master script, optionally filtered by folder.
pub async fn list(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ScriptResponse>>, AppError> {
    let all_folders = db::folders::get_all(&state.db).await?;
    let scripts = db::scripts::get_all(&state.db).await?;

    let response = scripts
        .into_iter()
        .filter(|s| match &params.folder_id {
            Some(folder_id) => &s.folder_id == folder_id,
            None => true,
        })
        .map(|script| {
            let folder_path = folders::display_path(&all_folders, &script.folder_id);
            ScriptResponse {
                script,
                folder_path,
            }
        })
        .collect();

    Ok(Json(response))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/scripts", get(list))
}
