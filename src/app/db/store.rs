//! Flat key-value entity store.
//!
//! Every logical collection is persisted as one row in `kv_store`, holding
//! the JSON-serialized ordered sequence of that collection's entities. All
//! higher-level operations are read-all, mutate in memory, save-all; the
//! single-row UPSERT in [`save_all`] is the only write primitive.

use serde::{de::DeserializeOwned, Serialize};
use sqlx::SqliteConnection;
use std::fmt;

/// Substrate keys, one per logical collection.
pub const KEY_FOLDERS: &str = "regression_folders";
pub const KEY_SCRIPTS: &str = "regression_scripts";
pub const KEY_PROJECTS: &str = "regression_projects";
pub const KEY_IMPORTED_SCRIPTS: &str = "regression_imported_scripts";
pub const KEY_ISSUES: &str = "regression_issues";
pub const KEY_COUNTERS: &str = "regression_counters";

/// Errors surfaced by the store layer.
#[derive(Debug)]
pub enum StoreError {
    Sqlx(sqlx::Error),
    Json(serde_json::Error),
    /// An `add` collided with an existing record id.
    DuplicateKey(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlx(e) => write!(f, "database error: {}", e),
            StoreError::Json(e) => write!(f, "stored collection failed to decode: {}", e),
            StoreError::DuplicateKey(id) => write!(f, "duplicate record id: {}", id),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Sqlx(e) => Some(e),
            StoreError::Json(e) => Some(e),
            StoreError::DuplicateKey(_) => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Sqlx(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Json(err)
    }
}

/// A record stored in one of the named collections.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Substrate key of the collection this entity lives in.
    const COLLECTION: &'static str;

    /// Opaque identifier, generated by the caller at creation time.
    fn id(&self) -> &str;
}

/// Read the raw JSON document stored under `key`, if any.
pub async fn read_value(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, StoreError> {
    let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(value)
}

/// Replace the JSON document stored under `key`.
pub async fn write_value(
    conn: &mut SqliteConnection,
    key: &str,
    value: &str,
) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO kv_store (key, value) VALUES (?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// The persisted collection in insertion order, or empty on first run.
pub async fn get_all<T: Entity>(conn: &mut SqliteConnection) -> Result<Vec<T>, StoreError> {
    match read_value(conn, T::COLLECTION).await? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Atomically replace the entire persisted collection.
pub async fn save_all<T: Entity>(
    conn: &mut SqliteConnection,
    items: &[T],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(items)?;
    write_value(conn, T::COLLECTION, &json).await
}

/// Append a record. Rejects an id that already exists in the collection.
pub async fn add<T: Entity>(conn: &mut SqliteConnection, item: &T) -> Result<(), StoreError> {
    let mut items = get_all::<T>(conn).await?;
    if items.iter().any(|existing| existing.id() == item.id()) {
        return Err(StoreError::DuplicateKey(item.id().to_string()));
    }
    items.push(item.clone());
    save_all(conn, &items).await
}

/// Apply `apply` to the record with matching id and persist the collection.
///
/// Returns whether a record was found; a miss leaves the collection untouched
/// and is not an error.
pub async fn update<T, F>(
    conn: &mut SqliteConnection,
    id: &str,
    apply: F,
) -> Result<bool, StoreError>
where
    T: Entity,
    F: FnOnce(&mut T),
{
    let mut items = get_all::<T>(conn).await?;
    match items.iter_mut().find(|item| item.id() == id) {
        Some(item) => {
            apply(item);
            save_all(conn, &items).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Remove the record with matching id. A miss is a no-op.
pub async fn delete<T: Entity>(conn: &mut SqliteConnection, id: &str) -> Result<(), StoreError> {
    let mut items = get_all::<T>(conn).await?;
    items.retain(|item| item.id() != id);
    save_all(conn, &items).await
}
