use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::put,
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use validator::Validate;

use crate::app::{
    db::{self, scripts::ScriptPatch},
    domain::{TestEnvironment, TestType},
    error::AppError,
    features::screenshots::{self, ScreenshotPayload},
    session::AdminSession,
    AppState,
};

/// Request body for updating a master script. Absent fields are preserved;
/// `created_at` is never touched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateScriptRequest {
    #[validate(length(min = 1, max = 100))]
    pub script_id: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub short_description: Option<String>,
    pub folder_id: Option<String>,
    pub test_environment: Option<TestEnvironment>,
    pub test_type: Option<TestType>,
    pub purpose: Option<String>,
    pub assumptions: Option<Vec<String>>,
    pub expected_results: Option<String>,
    pub script_details: Option<String>,
    #[validate]
    pub screenshots: Option<Vec<ScreenshotPayload>>,
}

/// PUT /api/scripts/:id — Partially update a master script. An unknown id
/// is a silent no-op; imported copies never see the change.
pub async fn update(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateScriptRequest>,
) -> Result<StatusCode, AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Please fill in all required fields".to_string()))?;

    if let Some(folder_id) = &request.folder_id {
        let folders = db::folders::get_all(&state.db).await?;
        if !folders.iter().any(|f| &f.id == folder_id) {
            return Err(AppError::Validation("Unknown folder".to_string()));
        }
    }

    let assumptions = request
        .assumptions
        .map(|list| list.into_iter().filter(|a| !a.trim().is_empty()).collect());

    let patch = ScriptPatch {
        script_id: request.script_id,
        short_description: request.short_description,
        folder_id: request.folder_id,
        test_environment: request.test_environment,
        test_type: request.test_type,
        purpose: request.purpose,
        assumptions,
        expected_results: request.expected_results,
        script_details: request.script_details,
        screenshots: request.screenshots.map(screenshots::into_screenshots),
        updated_at: Some(OffsetDateTime::now_utc()),
    };

    let mut conn = state.db.acquire().await?;
    db::scripts::update(&mut conn, &id, patch).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/scripts/:id", put(update))
}
