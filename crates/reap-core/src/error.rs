use std::time::Duration;

use thiserror::Error;

use reap_model::Region;

use crate::plane::ControlPlaneError;

/// Pass-level failures.
///
/// Per-job problems (bad timestamps, failed cancellations) never surface here;
/// they are reflected in the pass report instead.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unable to obtain list of active jobs in {region}: {source}")]
    InventoryFetch {
        region: Region,
        #[source]
        source: ControlPlaneError,
    },

    #[error("listing active jobs in {region} timed out after {timeout:?}")]
    InventoryTimeout { region: Region, timeout: Duration },

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether repeating the pass later may succeed without intervention.
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::InventoryTimeout { .. } => true,
            CoreError::InventoryFetch { source, .. } => source.is_retryable(),
            CoreError::Internal(_) => false,
        }
    }

    /// Stable short name used for metrics and error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::InventoryFetch { .. } => "inventory_fetch",
            CoreError::InventoryTimeout { .. } => "inventory_timeout",
            CoreError::Internal(_) => "internal",
        }
    }
}
