//! In-process session state.
//!
//! Sessions live only in memory for the lifetime of the process: no token,
//! no expiry, nothing persisted. Handlers receive the authenticated user as
//! an explicit context value through the extractors below; there is no
//! global current-user state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use crate::app::{domain::UserRole, error::AppError, AppState};

pub const SESSION_COOKIE: &str = "session_id";

/// The authenticated user attached to a session.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

/// Process-wide session map, shared through `AppState`.
pub type SessionMap = Arc<RwLock<HashMap<String, CurrentUser>>>;

pub fn session_cookie(session_id: impl Into<String>) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.into()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .removal()
        .into()
}

/// Any authenticated session. Rejects with 401 when no valid session cookie
/// is presented.
pub struct ApiSession(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for ApiSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Internal)?;
        let cookie = jar
            .get(SESSION_COOKIE)
            .ok_or_else(|| AppError::Auth("Not logged in".to_string()))?;
        let sessions = state.sessions.read().map_err(|_| AppError::Internal)?;
        let user = sessions
            .get(cookie.value())
            .cloned()
            .ok_or_else(|| AppError::Auth("Not logged in".to_string()))?;
        Ok(ApiSession(user))
    }
}

/// An authenticated Administrator session. Rejects with 403 for other roles.
pub struct AdminSession(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let ApiSession(user) = ApiSession::from_request_parts(parts, state).await?;
        if user.role != UserRole::Administrator {
            return Err(AppError::Forbidden("Administrator access required".to_string()));
        }
        Ok(AdminSession(user))
    }
}

/// An authenticated User session. Rejects with 403 for other roles.
pub struct UserSession(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for UserSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let ApiSession(user) = ApiSession::from_request_parts(parts, state).await?;
        if user.role != UserRole::User {
            return Err(AppError::Forbidden("User access required".to_string()));
        }
        Ok(UserSession(user))
    }
}
