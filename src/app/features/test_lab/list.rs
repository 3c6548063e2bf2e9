use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::app::{
    db::{self, imported_scripts::ImportedScript},
    domain::ExecutionStatus,
    error::AppError,
    session::UserSession,
    AppState,
};

/// Test lab tab buckets. `pending` folds in scripts still in progress;
/// `with-issues` means "has issues and is not completed" regardless of the
/// current status value.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    All,
    Completed,
    Pending,
    WithIssues,
}

/// Query parameters for the imported script listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub bucket: Option<Bucket>,
}

fn in_bucket(script: &ImportedScript, bucket: Bucket) -> bool {
    match bucket {
        Bucket::All => true,
        Bucket::Completed => script.status == ExecutionStatus::Completed,
        Bucket::Pending => matches!(
            script.status,
            ExecutionStatus::Pending | ExecutionStatus::InProgress
        ),
        Bucket::WithIssues => {
            !script.issue_ids.is_empty() && script.status != ExecutionStatus::Completed
        }
    }
}

/// GET /api/projects/:project_id/scripts — The project's imported scripts,
/// optionally narrowed to one tab bucket.
pub async fn list(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ImportedScript>>, AppError> {
    let bucket = params.bucket.unwrap_or(Bucket::All);
    let scripts = db::imported_scripts::find_by_project(&state.db, &project_id)
        .await?
        .into_iter()
        .filter(|s| in_bucket(s, bucket))
        .collect();

    Ok(Json(scripts))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/projects/:project_id/scripts", get(list))
}
