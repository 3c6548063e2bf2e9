use serde::{Deserialize, Serialize};
use sqlx::{SqliteConnection, SqlitePool};

use crate::app::db::store::{self, Entity, StoreError};

/// Stored record for a script folder. Hierarchy depth is unbounded in the
/// store; only two levels (root, sub-folder) are ever materialized by
/// clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub icon: Option<String>,
}

impl Entity for Folder {
    const COLLECTION: &'static str = store::KEY_FOLDERS;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Typed partial update for a folder. `parent_id` distinguishes "leave
/// untouched" (None) from "clear the parent" (Some(None)).
#[derive(Debug, Default)]
pub struct FolderPatch {
    pub name: Option<String>,
    pub parent_id: Option<Option<String>>,
    pub icon: Option<String>,
}

impl FolderPatch {
    fn apply(self, folder: &mut Folder) {
        if let Some(name) = self.name {
            folder.name = name;
        }
        if let Some(parent_id) = self.parent_id {
            folder.parent_id = parent_id;
        }
        if let Some(icon) = self.icon {
            folder.icon = Some(icon);
        }
    }
}

/// All folders in insertion order.
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Folder>, StoreError> {
    let mut conn = pool.acquire().await?;
    store::get_all::<Folder>(&mut conn).await
}

/// Append a new folder. Rejects a duplicate id.
pub async fn insert(conn: &mut SqliteConnection, folder: &Folder) -> Result<(), StoreError> {
    store::add(conn, folder).await
}

/// Apply a patch to the folder with matching id. A miss is a silent no-op.
pub async fn update(
    conn: &mut SqliteConnection,
    id: &str,
    patch: FolderPatch,
) -> Result<bool, StoreError> {
    store::update::<Folder, _>(conn, id, |folder| patch.apply(folder)).await
}

/// Delete a folder together with its direct sub-folders.
///
/// The cascade is single-level: grandchildren keep their `parent_id` and
/// become dangling. Scripts referencing the removed folder are neither
/// deleted nor reassigned.
pub async fn delete_cascade(conn: &mut SqliteConnection, id: &str) -> Result<(), StoreError> {
    let mut folders = store::get_all::<Folder>(conn).await?;
    folders.retain(|f| f.id != id && f.parent_id.as_deref() != Some(id));
    store::save_all(conn, &folders).await
}

/// Display path for a folder reference: `"Parent > Child"` for sub-folders,
/// the bare name for roots, `"Unknown Folder"` when the reference dangles.
pub fn display_path(folders: &[Folder], folder_id: &str) -> String {
    let Some(folder) = folders.iter().find(|f| f.id == folder_id) else {
        return "Unknown Folder".to_string();
    };
    match &folder.parent_id {
        Some(parent_id) => match folders.iter().find(|f| &f.id == parent_id) {
            Some(parent) => format!("{} > {}", parent.name, folder.name),
            None => folder.name.clone(),
        },
        None => folder.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, name: &str, parent_id: Option<&str>) -> Folder {
        Folder {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
            icon: None,
        }
    }

    #[test]
    fn display_path_resolves_parent_chain() {
        let folders = vec![folder("1", "Login", None), folder("2", "SSO", Some("1"))];
        assert_eq!(display_path(&folders, "1"), "Login");
        assert_eq!(display_path(&folders, "2"), "Login > SSO");
    }

    #[test]
    fn display_path_degrades_on_dangling_reference() {
        let folders = vec![folder("2", "SSO", Some("gone"))];
        assert_eq!(display_path(&folders, "missing"), "Unknown Folder");
        // A dangling parent falls back to the folder's own name.
        assert_eq!(display_path(&folders, "2"), "SSO");
    }
}
