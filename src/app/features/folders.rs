use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;
use ulid::Ulid;
use validator::Validate;

use crate::app::{
    db::{
        self,
        folders::{Folder, FolderPatch},
    },
    error::AppError,
    session::AdminSession,
    AppState,
};

/// Request body for creating a folder.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFolderRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub parent_id: Option<String>,
}

/// Request body for updating a folder. The form always carries the full
/// name/parent pair; an absent `parent_id` clears the parent.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFolderRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub parent_id: Option<String>,
}

/// GET /api/folders — The full folder collection.
pub async fn list(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Folder>>, AppError> {
    let folders = db::folders::get_all(&state.db).await?;
    Ok(Json(folders))
}

/// POST /api/folders — Create a folder (root or sub-folder).
pub async fn create(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Json(request): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<Folder>), AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Folder name must be 1-255 characters".to_string()))?;

    let folder = Folder {
        id: Ulid::new().to_string(),
        name: request.name,
        parent_id: request.parent_id,
        icon: Some("folder".to_string()),
    };

    let mut conn = state.db.acquire().await?;
    db::folders::insert(&mut conn, &folder).await?;

    Ok((StatusCode::CREATED, Json(folder)))
}

/// PUT /api/folders/:id — Rename and/or re-parent a folder. An unknown id
/// is a silent no-op.
pub async fn update(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateFolderRequest>,
) -> Result<StatusCode, AppError> {
    request
        .validate()
        .map_err(|_| AppError::Validation("Folder name must be 1-255 characters".to_string()))?;

    let patch = FolderPatch {
        name: Some(request.name),
        parent_id: Some(request.parent_id),
        icon: None,
    };

    let mut conn = state.db.acquire().await?;
    db::folders::update(&mut conn, &id, patch).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/folders/:id — Delete a folder and its direct sub-folders.
/// Scripts referencing the folder are left dangling.
pub async fn remove(
    AdminSession(_): AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut conn = state.db.acquire().await?;
    db::folders::delete_cascade(&mut conn, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/folders", get(list).post(create))
        .route("/api/folders/:id", put(update).delete(remove))
}
