use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};
use time::OffsetDateTime;

use crate::app::db::screenshots::Screenshot;
use crate::app::db::store::{self, Entity, StoreError};
use crate::app::domain::{TestEnvironment, TestType};

/// Master script template authored by administrators. Importing copies the
/// full field set into a project; later edits here do not propagate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub id: String,
    /// Human-facing label, not guaranteed unique.
    pub script_id: String,
    pub short_description: String,
    pub folder_id: String,
    pub test_environment: TestEnvironment,
    pub test_type: TestType,
    pub purpose: String,
    pub assumptions: Vec<String>,
    pub expected_results: String,
    pub script_details: String,
    pub screenshots: Vec<Screenshot>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Entity for Script {
    const COLLECTION: &'static str = store::KEY_SCRIPTS;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Typed partial update for a script. `created_at` is immutable and has no
/// patch field.
#[derive(Debug, Default)]
pub struct ScriptPatch {
    pub script_id: Option<String>,
    pub short_description: Option<String>,
    pub folder_id: Option<String>,
    pub test_environment: Option<TestEnvironment>,
    pub test_type: Option<TestType>,
    pub purpose: Option<String>,
    pub assumptions: Option<Vec<String>>,
    pub expected_results: Option<String>,
    pub script_details: Option<String>,
    pub screenshots: Option<Vec<Screenshot>>,
    pub updated_at: Option<OffsetDateTime>,
}

impl ScriptPatch {
    fn apply(self, script: &mut Script) {
        if let Some(v) = self.script_id {
            script.script_id = v;
        }
        if let Some(v) = self.short_description {
            script.short_description = v;
        }
        if let Some(v) = self.folder_id {
            script.folder_id = v;
        }
        if let Some(v) = self.test_environment {
            script.test_environment = v;
        }
        if let Some(v) = self.test_type {
            script.test_type = v;
        }
        if let Some(v) = self.purpose {
            script.purpose = v;
        }
        if let Some(v) = self.assumptions {
            script.assumptions = v;
        }
        if let Some(v) = self.expected_results {
            script.expected_results = v;
        }
        if let Some(v) = self.script_details {
            script.script_details = v;
        }
        if let Some(v) = self.screenshots {
            script.screenshots = v;
        }
        if let Some(v) = self.updated_at {
            script.updated_at = v;
        }
    }
}

/// All master scripts in insertion order.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Script>, StoreError> {
    let mut conn = pool.acquire().await?;
    store::get_all::<Script>(&mut conn).await
}

/// Find a master script by id.
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Script>, StoreError> {
    Ok(get_all(pool).await?.into_iter().find(|s| s.id == id))
}

/// Append a new master script. Rejects a duplicate id.
pub async fn insert(conn: &mut SqliteConnection, script: &Script) -> Result<(), StoreError> {
    store::add(conn, script).await
}

/// Apply a patch to the script with matching id. A miss is a silent no-op.
pub async fn update(
    conn: &mut SqliteConnection,
    id: &str,
    patch: ScriptPatch,
) -> Result<bool, StoreError> {
    store::update::<Script, _>(conn, id, |script| patch.apply(script)).await
}

/// Delete a master script. Imported copies are snapshots and are untouched.
pub async fn delete(conn: &mut SqliteConnection, id: &str) -> Result<(), StoreError> {
    store::delete::<Script>(conn, id).await
}
