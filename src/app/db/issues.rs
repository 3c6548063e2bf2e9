use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use time::OffsetDateTime;

use crate::app::db::screenshots::Screenshot;
use crate::app::db::store::{self, Entity, StoreError};
use crate::app::domain::IssueStatus;

/// A defect logged against an imported script. `issue_number` is unique
/// within a project and allocated by the counter service; `script_id`
/// references the imported script the issue was raised against, and
/// `project_id` matches that script's project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub issue_number: i64,
    pub project_id: String,
    pub script_id: String,
    pub title: String,
    pub description: String,
    pub status: IssueStatus,
    pub screenshots: Vec<Screenshot>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Entity for Issue {
    const COLLECTION: &'static str = store::KEY_ISSUES;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Typed partial update for an issue. `created_at` and the project/script
/// references are immutable after creation.
#[derive(Debug, Default)]
pub struct IssuePatch {
    pub status: Option<IssueStatus>,
    pub updated_at: Option<OffsetDateTime>,
}

impl IssuePatch {
    fn apply(self, issue: &mut Issue) {
        if let Some(v) = self.status {
            issue.status = v;
        }
        if let Some(v) = self.updated_at {
            issue.updated_at = v;
        }
    }
}

/// All issues across every project, in insertion order.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Issue>, StoreError> {
    let mut conn = pool.acquire().await?;
    store::get_all::<Issue>(&mut conn).await
}

/// Issues belonging to one project.
pub async fn find_by_project(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<Issue>, StoreError> {
    Ok(get_all(pool)
        .await?
        .into_iter()
        .filter(|i| i.project_id == project_id)
        .collect())
}

/// Find an issue by id.
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Issue>, StoreError> {
    Ok(get_all(pool).await?.into_iter().find(|i| i.id == id))
}

/// Whether an issue exists within the given project. Usable inside a
/// transaction.
pub async fn exists_in_project(
    conn: &mut SqliteConnection,
    project_id: &str,
    issue_id: &str,
) -> Result<bool, StoreError> {
    let issues = store::get_all::<Issue>(conn).await?;
    Ok(issues
        .iter()
        .any(|i| i.id == issue_id && i.project_id == project_id))
}

/// Append a new issue. Rejects a duplicate id.
pub async fn insert(conn: &mut SqliteConnection, issue: &Issue) -> Result<(), StoreError> {
    store::add(conn, issue).await
}

/// Apply a patch to the issue with matching id. A miss is a silent no-op.
pub async fn update(
    conn: &mut SqliteConnection,
    id: &str,
    patch: IssuePatch,
) -> Result<bool, StoreError> {
    store::update::<Issue, _>(conn, id, |issue| patch.apply(issue)).await
}
