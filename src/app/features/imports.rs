use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::{
    db::{self, folders, imported_scripts::ImportedScript, scripts::Script},
    error::AppError,
    session::UserSession,
    AppState,
};

/// Query parameters for the import candidate listing.
#[derive(Debug, Deserialize)]
pub struct AvailableParams {
    pub folder_id: Option<String>,
}

/// A master script as seen from a project's import page.
#[derive(Debug, Serialize)]
pub struct ImportCandidate {
    #[serde(flatten)]
    pub script: Script,
    pub folder_path: String,
    /// Whether this project already holds a copy.
    pub imported: bool,
}

/// Request body for importing a script into a project.
#[derive(Debug, Deserialize, Validate)]
pub struct ImportRequest {
    #[validate(length(min = 1))]
    pub script_id: String,
}

/// GET /api/projects/:project_id/available-scripts — The master library,
/// flagged with what this project has already imported.
pub async fn available(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<AvailableParams>,
) -> Result<Json<Vec<ImportCandidate>>, AppError> {
    let all_folders = db::folders::get_all(&state.db).await?;
    let scripts = db::scripts::get_all(&state.db).await?;
    let imported = db::imported_scripts::find_by_project(&state.db, &project_id).await?;

    let response = scripts
        .into_iter()
        .filter(|s| match &params.folder_id {
            Some(folder_id) => &s.folder_id == folder_id,
            None => true,
        })
        .map(|script| {
            let folder_path = folders::display_path(&all_folders, &script.folder_id);
            let already = imported.iter().any(|i| i.script.id == script.id);
            ImportCandidate {
                script,
                folder_path,
                imported: already,
            }
        })
        .collect();

    Ok(Json(response))
}

/// POST /api/projects/:project_id/imports — Snapshot a master script into
/// the project. The copy keeps the source script's id, scoped by project;
/// re-import is rejected here, not by the store.
pub async fn import(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<ImportRequest>,
) -> Result<(StatusCode, Json<ImportedScript>), AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("script_id is required".to_string()))?;

    db::projects::find_by_id(&state.db, &project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let script = db::scripts::find_by_id(&state.db, &request.script_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Script not found".to_string()))?;

    if db::imported_scripts::find_in_project(&state.db, &project_id, &script.id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Script already imported into this project".to_string(),
        ));
    }

    let imported = ImportedScript::import(script, project_id);

    let mut conn = state.db.acquire().await?;
    db::imported_scripts::insert(&mut conn, &imported).await?;

    Ok((StatusCode::CREATED, Json(imported)))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects/:project_id/available-scripts", get(available))
        .route("/api/projects/:project_id/imports", post(import))
}
