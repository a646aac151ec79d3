use std::sync::Arc;

/// Reap pass outcome for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Inventory fetched and every violator attempted.
    Completed,
    /// Inventory query failed.
    InventoryFailed,
    /// Inventory query timed out.
    InventoryTimeout,
    /// Pass aborted for an internal reason.
    Internal,
}

impl PassOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            PassOutcome::Completed => "completed",
            PassOutcome::InventoryFailed => "inventory_failed",
            PassOutcome::InventoryTimeout => "inventory_timeout",
            PassOutcome::Internal => "internal",
        }
    }
}

/// Outcome of a single cancel attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Cancellation confirmed by the control plane.
    Cancelled,
    /// Call succeeded but the output did not confirm the cancellation.
    Unconfirmed,
    /// Call completed with a failure status.
    Rejected,
    /// Call could not be completed.
    Error,
    /// Call exceeded the per-call timeout.
    Timeout,
}

impl CancelOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            CancelOutcome::Cancelled => "cancelled",
            CancelOutcome::Unconfirmed => "unconfirmed",
            CancelOutcome::Rejected => "rejected",
            CancelOutcome::Error => "error",
            CancelOutcome::Timeout => "timeout",
        }
    }

    /// Whether the job ends up in the success list.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, CancelOutcome::Cancelled)
    }
}

/// Backend metrics collection interface.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a finished pass with its outcome and wall-clock duration.
    fn record_pass(&self, outcome: PassOutcome, duration_ms: u64);
    /// Record how many inventory entries were evaluated in one pass.
    fn record_jobs_evaluated(&self, count: u64);
    /// Record an inventory entry skipped because of an unparseable creation time.
    fn record_job_skipped(&self);
    /// Record how many violators one pass selected.
    fn record_violators(&self, count: u64);
    /// Record one cancel attempt.
    fn record_cancel(&self, outcome: CancelOutcome);
    /// Record an inventory failure.
    ///
    /// # Arguments
    /// - `error_kind`: Error category (`non_zero_exit`, `decode`, `timeout`, ...)
    fn record_inventory_error(&self, error_kind: &str);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_cancelled_is_success() {
        let all = [
            CancelOutcome::Cancelled,
            CancelOutcome::Unconfirmed,
            CancelOutcome::Rejected,
            CancelOutcome::Error,
            CancelOutcome::Timeout,
        ];
        let successes: Vec<_> = all.iter().filter(|o| o.is_success()).collect();
        assert_eq!(successes, vec![&CancelOutcome::Cancelled]);
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels = vec![
            PassOutcome::Completed.as_label(),
            PassOutcome::InventoryFailed.as_label(),
            PassOutcome::InventoryTimeout.as_label(),
            PassOutcome::Internal.as_label(),
        ];
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 4);
    }
}
