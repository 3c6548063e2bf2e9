use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Target environment a script runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TestEnvironment {
    Online,
    Batch,
    #[serde(rename = "Online & Batch")]
    #[strum(serialize = "Online & Batch")]
    OnlineAndBatch,
}
