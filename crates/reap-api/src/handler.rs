use async_trait::async_trait;

use reap_model::{MaxDuration, ReapResult, Region};

use crate::error::ApiError;

/// Per-request overrides of the configured policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOverrides {
    pub max_duration: Option<MaxDuration>,
    pub region: Option<Region>,
}

/// Reap API handler.
///
/// Abstracts the backend so the HTTP layer can be exercised without a real
/// control plane, or wrapped with extra logic (auth, rate limiting, etc.).
#[async_trait]
pub trait ReapHandler: Send + Sync + 'static {
    /// Run one reap pass with the configured policy plus `overrides`.
    async fn run_pass(&self, overrides: PolicyOverrides) -> Result<ReapResult, ApiError>;
}
