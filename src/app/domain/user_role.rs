use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Account role enum. Gates the admin and user surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum UserRole {
    User,
    Administrator,
}
