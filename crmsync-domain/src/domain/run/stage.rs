use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Position of a run in its strictly linear lifecycle. `Failed` can be
/// entered from any other stage and is terminal, as is `Loaded`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum RunStage {
    Idle,
    SourceAuthenticated,
    Extracted,
    DestAuthenticated,
    Loaded,
    Failed,
}

impl RunStage {
    /// The only stage a successful step may move to.
    pub fn successor(self) -> Option<RunStage> {
        match self {
            RunStage::Idle => Some(RunStage::SourceAuthenticated),
            RunStage::SourceAuthenticated => Some(RunStage::Extracted),
            RunStage::Extracted => Some(RunStage::DestAuthenticated),
            RunStage::DestAuthenticated => Some(RunStage::Loaded),
            RunStage::Loaded | RunStage::Failed => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RunStage::Loaded | RunStage::Failed)
    }
}
