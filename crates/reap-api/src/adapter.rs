use async_trait::async_trait;
use tracing::debug;

use reap_core::Reaper;
use reap_model::{ReapPolicy, ReapResult};

use crate::error::ApiError;
use crate::handler::{PolicyOverrides, ReapHandler};

/// Adapter that bridges [`Reaper`] to [`ReapHandler`].
///
/// Each pass runs detached from the request, so a client that disconnects
/// mid-pass does not abandon in-flight cancellations.
pub struct ReaperAdapter {
    reaper: Reaper,
    policy: ReapPolicy,
}

impl ReaperAdapter {
    /// Create a new adapter running `reaper` with `policy` by default.
    pub fn new(reaper: Reaper, policy: ReapPolicy) -> Self {
        Self { reaper, policy }
    }

    /// Policy applied when a request carries no overrides.
    pub fn policy(&self) -> &ReapPolicy {
        &self.policy
    }
}

#[async_trait]
impl ReapHandler for ReaperAdapter {
    async fn run_pass(&self, overrides: PolicyOverrides) -> Result<ReapResult, ApiError> {
        let policy = self
            .policy
            .with_overrides(overrides.max_duration, overrides.region);
        debug!(region = %policy.region, max_duration = %policy.max_duration, "starting reap pass");

        let report = self.reaper.run_detached(policy).await?;
        Ok(report.result)
    }
}
