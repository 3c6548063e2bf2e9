use ulid::Ulid;

use crate::app::{
    domain::UserRole,
    error::AppError,
    session::CurrentUser,
    AppState,
};

/// The two fixed credential tuples this deployment accepts. There is no
/// account management surface; these are the only logins.
const VALID_CREDENTIALS: &[(&str, &str, UserRole)] = &[
    ("admin", "admin", UserRole::Administrator),
    ("user01", "user01", UserRole::User),
];

/// Check a credential tuple. All three parts must match.
pub fn authenticate(username: &str, password: &str, role: UserRole) -> Option<CurrentUser> {
    VALID_CREDENTIALS
        .iter()
        .find(|(u, p, r)| *u == username && *p == password && *r == role)
        .map(|(u, _, r)| CurrentUser {
            id: u.to_string(),
            username: u.to_string(),
            role: *r,
        })
}

/// Register a new session for the user. Returns the session ID.
pub fn create_session(state: &AppState, user: CurrentUser) -> Result<String, AppError> {
    let session_id = Ulid::new().to_string();
    let mut sessions = state.sessions.write().map_err(|_| AppError::Internal)?;
    sessions.insert(session_id.clone(), user);
    Ok(session_id)
}

/// Drop a session. Unknown session IDs are ignored.
pub fn destroy_session(state: &AppState, session_id: &str) -> Result<(), AppError> {
    let mut sessions = state.sessions.write().map_err(|_| AppError::Internal)?;
    sessions.remove(session_id);
    Ok(())
}
