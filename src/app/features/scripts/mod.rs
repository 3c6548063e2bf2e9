pub mod create;
pub mod delete;
pub mod list;
pub mod show;
pub mod update;

use axum::Router;
use crate::app::AppState;

/// Master script library routes (Administrator only).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(list::routes())
        .merge(create::routes())
        .merge(show::routes())
        .merge(update::routes())
        .merge(delete::routes())
}
