use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::app::{
    db::{self, projects::Project},
    error::AppError,
    session::UserSession,
    AppState,
};

/// Request body for creating a project.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

/// GET /api/projects — Every project, in creation order.
pub async fn list(
    UserSession(_): UserSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = db::projects::get_all(&state.db).await?;
    Ok(Json(projects))
}

/// POST /api/projects — Create a project.
pub async fn create(
    UserSession(_): UserSession,
    State(state): State<AppState>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Project name must be 1-255 characters".to_string()))?;

    let project = Project {
        id: Ulid::new().to_string(),
        name: request.name,
        created_at: OffsetDateTime::now_utc(),
    };

    let mut conn = state.db.acquire().await?;
    db::projects::insert(&mut conn, &project).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/projects", get(list).post(create))
}
