use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use time::OffsetDateTime;

use crate::app::db::store::{self, Entity, StoreError};

/// Top-level container for a user's regression work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Entity for Project {
    const COLLECTION: &'static str = store::KEY_PROJECTS;

    fn id(&self) -> &str {
        &self.id
    }
}

/// All projects in insertion order.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Project>, StoreError> {
    let mut conn = pool.acquire().await?;
    store::get_all::<Project>(&mut conn).await
}

/// Find a project by id.
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Project>, StoreError> {
    Ok(get_all(pool).await?.into_iter().find(|p| p.id == id))
}

/// Append a new project. Rejects a duplicate id.
pub async fn insert(conn: &mut SqliteConnection, project: &Project) -> Result<(), StoreError> {
    store::add(conn, project).await
}
