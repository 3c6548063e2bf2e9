use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Issue lifecycle: open -> fixed <-> reopened, cycling indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IssueStatus {
    Open,
    Fixed,
    Reopened,
}

impl IssueStatus {
    /// Initial state when an issue is raised.
    pub fn initial() -> Self {
        IssueStatus::Open
    }

    /// Marking fixed is legal from `open` or `reopened`.
    pub fn can_mark_fixed(self) -> bool {
        matches!(self, IssueStatus::Open | IssueStatus::Reopened)
    }

    /// Reopening is legal only from `fixed`.
    pub fn can_reopen(self) -> bool {
        matches!(self, IssueStatus::Fixed)
    }
}
