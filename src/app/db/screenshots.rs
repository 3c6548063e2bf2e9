use serde::{Deserialize, Serialize};

/// Embedded screenshot. `path` holds a self-contained data-URL encoding of
/// the image; there is no external file reference. A screenshot is owned
/// exclusively by whichever record embeds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: String,
    pub filename: String,
    pub description: String,
    pub path: String,
}
