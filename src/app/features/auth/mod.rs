pub mod current;
pub mod login;
pub mod logout;
pub mod service;

use axum::Router;
use crate::app::AppState;

/// Authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(login::routes())
        .merge(logout::routes())
        .merge(current::routes())
}
