use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

use crate::app::{
    db::{
        self,
        imported_scripts::{ExecutionPatch, ImportedScript},
    },
    domain::ExecutionStatus,
    error::AppError,
    features::screenshots::{self, ScreenshotPayload},
    session::UserSession,
    AppState,
};

/// Path parameters for execution actions.
#[derive(Debug, Deserialize)]
pub struct ExecutePathParams {
    pub project_id: String,
    pub script_id: String,
}

/// Request body shared by the save-progress and mark-complete actions.
/// `remarks` is the current text of the remarks field; `screenshots` are the
/// uploads captured since the last action and are appended, never replacing
/// what earlier actions persisted.
#[derive(Debug, Deserialize, Validate)]
pub struct ExecutionRequest {
    pub remarks: Option<String>,
    #[serde(default)]
    #[validate]
    pub screenshots: Vec<ScreenshotPayload>,
}

/// POST /api/projects/:project_id/scripts/:script_id/save — Save progress.
/// Legal from every status.
pub async fn save(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(params): Path<ExecutePathParams>,
    Json(request): Json<ExecutionRequest>,
) -> Result<Json<ImportedScript>, AppError> {
    apply_transition(&state, params, request, ExecutionStatus::InProgress).await
}

/// POST /api/projects/:project_id/scripts/:script_id/complete — Mark the
/// execution complete. Legal from every status; a completed script may be
/// retargeted later.
pub async fn complete(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(params): Path<ExecutePathParams>,
    Json(request): Json<ExecutionRequest>,
) -> Result<Json<ImportedScript>, AppError> {
    apply_transition(&state, params, request, ExecutionStatus::Completed).await
}

async fn apply_transition(
    state: &AppState,
    params: ExecutePathParams,
    request: ExecutionRequest,
    status: ExecutionStatus,
) -> Result<Json<ImportedScript>, AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Invalid screenshot upload".to_string()))?;

    let existing =
        db::imported_scripts::find_in_project(&state.db, &params.project_id, &params.script_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Script not found in this project".to_string()))?;

    let mut accumulated = existing.execution_screenshots;
    accumulated.extend(screenshots::into_screenshots(request.screenshots));

    let patch = ExecutionPatch {
        status: Some(status),
        remarks: Some(request.remarks),
        execution_screenshots: Some(accumulated),
        issue_ids: None,
    };

    let mut conn = state.db.acquire().await?;
    db::imported_scripts::update(&mut conn, &params.project_id, &params.script_id, patch).await?;
    drop(conn);

    let updated =
        db::imported_scripts::find_in_project(&state.db, &params.project_id, &params.script_id)
            .await?
            .ok_or(AppError::Internal)?;

    Ok(Json(updated))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects/:project_id/scripts/:script_id/save", post(save))
        .route(
            "/api/projects/:project_id/scripts/:script_id/complete",
            post(complete),
        )
}
