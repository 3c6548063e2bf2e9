use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::Error as SqlxError;

use crate::app::db::store::StoreError;

/// Application error type for unified error handling across the app.
#[derive(Debug)]
pub enum AppError {
    /// Validation errors (400 Bad Request) - invalid input data
    Validation(String),

    /// Authentication errors (401 Unauthorized) - wrong credentials, no session
    Auth(String),

    /// Authorization errors (403 Forbidden) - wrong role for this surface
    Forbidden(String),

    /// Missing entity (404 Not Found)
    NotFound(String),

    /// Duplicate key / already-imported conflicts (409 Conflict)
    Conflict(String),

    /// Database errors (500 Internal Server Error)
    Database(SqlxError),

    /// Persisted collection could not be decoded (500 Internal Server Error)
    Corrupt(serde_json::Error),

    /// Generic internal errors (500 Internal Server Error)
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Database(err) => {
                tracing::error!(%err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Corrupt(err) => {
                tracing::error!(%err, "stored collection failed to decode");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Sqlx(e) => AppError::Database(e),
            StoreError::Json(e) => AppError::Corrupt(e),
            StoreError::DuplicateKey(id) => {
                AppError::Conflict(format!("Record already exists: {}", id))
            }
        }
    }
}
