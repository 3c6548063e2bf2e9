use std::collections::HashMap;

use sqlx::SqliteConnection;

use crate::app::db::store::{self, StoreError};

/// Per-project issue number allocator.
///
/// Each call permanently consumes a number: numbers are never reused even if
/// the caller later aborts the issue creation that requested one. Gaps are
/// an accepted property; monotonicity is the contract.
pub async fn next_issue_number(
    conn: &mut SqliteConnection,
    project_id: &str,
) -> Result<i64, StoreError> {
    let mut counters = read_counters(conn).await?;
    let key = format!("issue_{}", project_id);
    let next = counters.get(&key).copied().unwrap_or(0) + 1;
    counters.insert(key, next);
    write_counters(conn, &counters).await?;
    Ok(next)
}

async fn read_counters(
    conn: &mut SqliteConnection,
) -> Result<HashMap<String, i64>, StoreError> {
    match store::read_value(conn, store::KEY_COUNTERS).await? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(HashMap::new()),
    }
}

async fn write_counters(
    conn: &mut SqliteConnection,
    counters: &HashMap<String, i64>,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(counters)?;
    store::write_value(conn, store::KEY_COUNTERS, &json).await
}
