use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::app::{
    db::{
        self, counters,
        imported_scripts::{ExecutionPatch, ImportedScript},
        issues::Issue,
    },
    domain::{ExecutionStatus, IssueStatus},
    error::AppError,
    features::screenshots::{self, ScreenshotPayload},
    session::UserSession,
    AppState,
};

use super::execute::ExecutePathParams;

/// Request body for the raise-issue action. Carries either `issue_id` to
/// link an existing project issue, or `title`/`description` to create a new
/// one; plus the execution state persisted with every transition.
#[derive(Debug, Deserialize, Validate)]
pub struct RaiseIssueRequest {
    pub issue_id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub remarks: Option<String>,
    #[serde(default)]
    #[validate]
    pub screenshots: Vec<ScreenshotPayload>,
}

/// Response: the updated script and the issue it now references.
#[derive(Debug, Serialize)]
pub struct RaiseIssueResponse {
    pub script: ImportedScript,
    pub issue_id: String,
}

/// POST /api/projects/:project_id/scripts/:script_id/issues — Raise an
/// issue against an imported script. Legal from every status; the script
/// transitions to `with-issues` and the issue id is linked de-duplicated.
/// Issue creation, number allocation, and the script update commit
/// together.
pub async fn raise(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(params): Path<ExecutePathParams>,
    Json(request): Json<RaiseIssueRequest>,
) -> Result<(StatusCode, Json<RaiseIssueResponse>), AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Invalid issue data".to_string()))?;

    let new_title = request.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
    if request.issue_id.is_none() && new_title.is_none() {
        return Err(AppError::Validation(
            "Link an existing issue or provide a title for a new one".to_string(),
        ));
    }

    let mut script =
        db::imported_scripts::find_in_project(&state.db, &params.project_id, &params.script_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Script not found in this project".to_string()))?;

    let mut accumulated = script.execution_screenshots.clone();
    accumulated.extend(screenshots::into_screenshots(request.screenshots));

    let mut tx = state.db.begin().await?;

    let issue_id = match request.issue_id {
        Some(id) => {
            if !db::issues::exists_in_project(&mut *tx, &params.project_id, &id).await? {
                return Err(AppError::NotFound("Issue not found in this project".to_string()));
            }
            id
        }
        None => {
            let title = new_title.unwrap_or_default().to_string();
            let number = counters::next_issue_number(&mut *tx, &params.project_id).await?;
            let now = OffsetDateTime::now_utc();
            let issue = Issue {
                id: Ulid::new().to_string(),
                issue_number: number,
                project_id: params.project_id.clone(),
                script_id: params.script_id.clone(),
                title,
                description: request.description,
                status: IssueStatus::initial(),
                screenshots: accumulated.clone(),
                created_at: now,
                updated_at: now,
            };
            db::issues::insert(&mut *tx, &issue).await?;
            issue.id
        }
    };

    script.link_issue(&issue_id);

    let patch = ExecutionPatch {
        status: Some(ExecutionStatus::WithIssues),
        remarks: Some(request.remarks),
        execution_screenshots: Some(accumulated),
        issue_ids: Some(script.issue_ids.clone()),
    };
    db::imported_scripts::update(&mut *tx, &params.project_id, &params.script_id, patch).await?;

    tx.commit().await?;

    let updated =
        db::imported_scripts::find_in_project(&state.db, &params.project_id, &params.script_id)
            .await?
            .ok_or(AppError::Internal)?;

    Ok((
        StatusCode::CREATED,
        Json(RaiseIssueResponse {
            script: updated,
            issue_id,
        }),
    ))
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/projects/:project_id/scripts/:script_id/issues",
        post(raise),
    )
}
