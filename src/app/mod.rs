use axum::Router;
use sqlx::SqlitePool;

/// Human-readable application name, used in logs and the seed binary.
pub const APP_NAME: &str = "Testdesk";

/// Shared state available to all handlers via Axum's state extractor.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// In-memory session map; sessions do not survive a restart.
    pub sessions: session::SessionMap,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            sessions: session::SessionMap::default(),
        }
    }
}

/// App routes (auth, admin library, user workflow). Wired into the router
/// in lib.rs.
pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new()
        .merge(features::auth::routes())
        .merge(features::folders::routes())
        .merge(features::scripts::routes())
        .merge(features::projects::routes())
        .merge(features::imports::routes())
        .merge(features::test_lab::routes())
        .merge(features::issues::routes())
}

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod features;
pub mod seeds;
pub mod session;
