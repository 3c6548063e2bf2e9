pub mod execute;
pub mod list;
pub mod raise_issue;

use axum::Router;
use crate::app::AppState;

/// Test lab routes: imported script listing plus the three execution
/// actions (save progress, mark complete, raise issue).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(list::routes())
        .merge(execute::routes())
        .merge(raise_issue::routes())
}
