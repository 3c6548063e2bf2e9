use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use time::OffsetDateTime;

use crate::app::{
    db::{
        self,
        issues::{Issue, IssuePatch},
    },
    domain::IssueStatus,
    error::AppError,
    session::UserSession,
    AppState,
};

/// Issue counts per status, shown at the top of the issue log.
#[derive(Debug, Serialize)]
pub struct IssueStats {
    pub open: usize,
    pub fixed: usize,
    pub reopened: usize,
}

/// The issue log for one project.
#[derive(Debug, Serialize)]
pub struct IssueLogResponse {
    pub issues: Vec<Issue>,
    pub stats: IssueStats,
}

/// GET /api/projects/:project_id/issues — The project's issues plus status
/// counts.
pub async fn list(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<IssueLogResponse>, AppError> {
    let issues = db::issues::find_by_project(&state.db, &project_id).await?;

    let stats = IssueStats {
        open: issues.iter().filter(|i| i.status == IssueStatus::Open).count(),
        fixed: issues.iter().filter(|i| i.status == IssueStatus::Fixed).count(),
        reopened: issues
            .iter()
            .filter(|i| i.status == IssueStatus::Reopened)
            .count(),
    };

    Ok(Json(IssueLogResponse { issues, stats }))
}

/// POST /api/issues/:id/fix — Mark an issue fixed. Legal from `open` or
/// `reopened`. The referencing script's status is never touched.
pub async fn fix(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Issue>, AppError> {
    transition(&state, &id, IssueStatus::Fixed).await
}

/// POST /api/issues/:id/reopen — Reopen a fixed issue.
pub async fn reopen(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Issue>, AppError> {
    transition(&state, &id, IssueStatus::Reopened).await
}

async fn transition(
    state: &AppState,
    id: &str,
    target: IssueStatus,
) -> Result<Json<Issue>, AppError> {
    let mut issue = db::issues::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;

    let legal = match target {
        IssueStatus::Fixed => issue.status.can_mark_fixed(),
        IssueStatus::Reopened => issue.status.can_reopen(),
        IssueStatus::Open => false,
    };
    if !legal {
        return Err(AppError::Validation(format!(
            "Issue cannot move from {} to {}",
            issue.status, target
        )));
    }

    let now = OffsetDateTime::now_utc();
    let patch = IssuePatch {
        status: Some(target),
        updated_at: Some(now),
    };

    let mut conn = state.db.acquire().await?;
    db::issues::update(&mut conn, id, patch).await?;

    issue.status = target;
    issue.updated_at = now;
    Ok(Json(issue))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects/:project_id/issues", get(list))
        .route("/api/issues/:id/fix", post(fix))
        .route("/api/issues/:id/reopen", post(reopen))
}
