use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::app::db::screenshots::Screenshot;
use crate::app::db::scripts::Script;
use crate::app::db::store::{self, Entity, StoreError};
use crate::app::domain::ExecutionStatus;

/// A script imported into a project: a snapshot of the master script's full
/// field set plus the execution lifecycle. The record keeps the source
/// script's `id`, scoped by `project_id`, so the same master script may be
/// imported into many projects independently.
///
/// The store does not enforce (id, project_id) uniqueness; the import
/// surface checks for an existing copy before inserting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedScript {
    #[serde(flatten)]
    pub script: Script,
    pub project_id: String,
    pub status: ExecutionStatus,
    pub remarks: Option<String>,
    pub execution_screenshots: Vec<Screenshot>,
    pub issue_ids: Vec<String>,
}

impl Entity for ImportedScript {
    const COLLECTION: &'static str = store::KEY_IMPORTED_SCRIPTS;

    fn id(&self) -> &str {
        &self.script.id
    }
}

impl ImportedScript {
    /// Snapshot a master script into a project, status `pending`.
    pub fn import(script: Script, project_id: String) -> Self {
        Self {
            script,
            project_id,
            status: ExecutionStatus::initial(),
            remarks: None,
            execution_screenshots: Vec::new(),
            issue_ids: Vec::new(),
        }
    }

    /// Record an issue against this script, de-duplicated.
    pub fn link_issue(&mut self, issue_id: &str) {
        if !self.issue_ids.iter().any(|id| id == issue_id) {
            self.issue_ids.push(issue_id.to_string());
        }
    }
}

/// Typed partial update for one execution step. Every transition persists
/// the current remarks and the full accumulated screenshot set.
#[derive(Debug, Default)]
pub struct ExecutionPatch {
    pub status: Option<ExecutionStatus>,
    pub remarks: Option<Option<String>>,
    pub execution_screenshots: Option<Vec<Screenshot>>,
    pub issue_ids: Option<Vec<String>>,
}

impl ExecutionPatch {
    fn apply(self, script: &mut ImportedScript) {
        if let Some(v) = self.status {
            script.status = v;
        }
        if let Some(v) = self.remarks {
            script.remarks = v;
        }
        if let Some(v) = self.execution_screenshots {
            script.execution_screenshots = v;
        }
        if let Some(v) = self.issue_ids {
            script.issue_ids = v;
        }
    }
}

/// All imported scripts across every project, in insertion order.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<ImportedScript>, StoreError> {
    let mut conn = pool.acquire().await?;
    store::get_all::<ImportedScript>(&mut conn).await
}

/// Imported scripts belonging to one project.
pub async fn find_by_project(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<ImportedScript>, StoreError> {
    Ok(get_all(pool)
        .await?
        .into_iter()
        .filter(|s| s.project_id == project_id)
        .collect())
}

/// Find one imported script by (project, id).
pub async fn find_in_project(
    pool: &SqlitePool,
    project_id: &str,
    script_id: &str,
) -> Result<Option<ImportedScript>, StoreError> {
    Ok(get_all(pool)
        .await?
        .into_iter()
        .find(|s| s.project_id == project_id && s.script.id == script_id))
}

/// Append an imported script.
pub async fn insert(
    conn: &mut SqliteConnection,
    script: &ImportedScript,
) -> Result<(), StoreError> {
    let mut items = store::get_all::<ImportedScript>(conn).await?;
    items.push(script.clone());
    store::save_all(conn, &items).await
}

/// Apply a patch to the imported script matching (project, id). A miss is a
/// silent no-op.
pub async fn update(
    conn: &mut SqliteConnection,
    project_id: &str,
    script_id: &str,
    patch: ExecutionPatch,
) -> Result<bool, StoreError> {
    let mut items = store::get_all::<ImportedScript>(conn).await?;
    match items
        .iter_mut()
        .find(|s| s.project_id == project_id && s.script.id == script_id)
    {
        Some(item) => {
            patch.apply(item);
            store::save_all(conn, &items).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}
