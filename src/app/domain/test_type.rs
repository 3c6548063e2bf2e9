use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Whether the script exercises the happy path or a failure path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TestType {
    Positive,
    Negative,
}
