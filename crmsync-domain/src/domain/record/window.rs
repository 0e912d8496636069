use crate::{InternalError, SyncError};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Half-open interval `[start, end)` of source modification times a run
/// covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ChangeWindow {
    /// Fails when `length` is not positive or reaches before the earliest
    /// representable instant.
    pub fn ending_at(end: DateTime<Utc>, length: Duration) -> Result<Self, SyncError> {
        end.checked_sub_signed(length)
            .filter(|_| length > Duration::zero())
            .map(|start| Self { start, end })
            .ok_or_else(|| {
                InternalError::configuration_error(
                    &format!("A change window of {length} cannot end at {end}"),
                    Some("window"),
                )
            })
    }

    /// `start` in the encoding the change-discovery endpoint expects.
    pub fn start_param(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `end` in the encoding the change-discovery endpoint expects.
    pub fn end_param(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl Display for ChangeWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_param(), self.end_param())
    }
}
