//! Control-plane port.
//!
//! The reaper only relies on two operations: listing active jobs in a region and
//! cancelling one job. Implementations may shell out to a CLI, call an SDK or
//! talk to the API directly.
mod error;
pub use error::ControlPlaneError;

mod memory;
pub use memory::MemoryControlPlane;

use std::sync::Arc;

use async_trait::async_trait;
use reap_model::{CancelResponse, Job, Region};

/// System of record for job inventory and cancellation.
#[async_trait]
pub trait ControlPlane: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// List every active job in `region`.
    ///
    /// Returns an error when the listing could not be obtained or decoded; an
    /// empty region yields `Ok(vec![])`.
    async fn list_active_jobs(&self, region: &Region) -> Result<Vec<Job>, ControlPlaneError>;

    /// Request cancellation of job `id` in `region`.
    ///
    /// A completed call, successful or not, is reported as `Ok`; `Err` means the
    /// call itself could not be carried out.
    async fn cancel_job(&self, id: &str, region: &Region)
    -> Result<CancelResponse, ControlPlaneError>;
}

/// Shared handle to a control plane implementation.
pub type ControlPlaneHandle = Arc<dyn ControlPlane>;
