use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::app::{
    db::{self, scripts::Script},
    domain::{TestEnvironment, TestType},
    error::AppError,
    features::screenshots::{self, ScreenshotPayload},
    session::AdminSession,
    AppState,
};

/// Request body for creating a master script.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateScriptRequest {
    #[validate(length(min = 1, max = 100))]
    pub script_id: String,
    #[validate(length(min = 1, max = 500))]
    pub short_description: String,
    #[validate(length(min = 1))]
    pub folder_id: String,
    pub test_environment: TestEnvironment,
    pub test_type: TestType,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub expected_results: String,
    #[serde(default)]
    pub script_details: String,
    #[serde(default)]
    #[validate]
    pub screenshots: Vec<ScreenshotPayload>,
}

/// POST /api/scripts — Author a new master script.
pub async fn create(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Json(request): Json<CreateScriptRequest>,
) -> Result<(StatusCode, Json<Script>), AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Please fill in all required fields".to_string()))?;

    let folders = db::folders::get_all(&state.db).await?;
    if !folders.iter().any(|f| f.id == request.folder_id) {
        return Err(AppError::Validation("Unknown folder".to_string()));
    }

    // Blank assumption rows are dropped rather than stored.
    let assumptions = request
        .assumptions
        .into_iter()
        .filter(|a| !a.trim().is_empty())
        .collect();

    let now = OffsetDateTime::now_utc();
    let script = Script {
        id: Ulid::new().to_string(),
        script_id: request.script_id,
        short_description: request.short_description,
        folder_id: request.folder_id,
        test_environment: request.test_environment,
        test_type: request.test_type,
        purpose: request.purpose,
        assumptions,
        expected_results: request.expected_results,
        script_details: request.script_details,
        screenshots: screenshots::into_screenshots(request.screenshots),
        created_at: now,
        updated_at: now,
    };

    let mut conn = state.db.acquire().await?;
    db::scripts::insert(&mut conn, &script).await?;

    Ok((StatusCode::CREATED, Json(script)))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/scripts", post(create))
}
