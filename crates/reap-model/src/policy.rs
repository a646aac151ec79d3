use serde::{Deserialize, Serialize};

use crate::{MaxDuration, Region};

/// Explicit configuration of one reap pass.
///
/// Passed into the reaper for every invocation instead of being read from the
/// process environment, so callers may override it per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ReapPolicy {
    /// Jobs running for longer than this are cancelled.
    pub max_duration: MaxDuration,
    /// Region every call of the pass is scoped to.
    pub region: Region,
}

impl ReapPolicy {
    /// Convenience constructor.
    pub fn new(max_duration: MaxDuration, region: Region) -> Self {
        Self {
            max_duration,
            region,
        }
    }

    /// Copy of this policy with the given overrides applied.
    pub fn with_overrides(&self, max_duration: Option<MaxDuration>, region: Option<Region>) -> Self {
        Self {
            max_duration: max_duration.unwrap_or(self.max_duration),
            region: region.unwrap_or_else(|| self.region.clone()),
        }
    }
}
