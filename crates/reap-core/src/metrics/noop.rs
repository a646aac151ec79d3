use crate::metrics::backend::{CancelOutcome, MetricsBackend, PassOutcome};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_pass(&self, _: PassOutcome, _: u64) {}

    #[inline(always)]
    fn record_jobs_evaluated(&self, _: u64) {}

    #[inline(always)]
    fn record_job_skipped(&self) {}

    #[inline(always)]
    fn record_violators(&self, _: u64) {}

    #[inline(always)]
    fn record_cancel(&self, _: CancelOutcome) {}

    #[inline(always)]
    fn record_inventory_error(&self, _: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }

    #[test]
    fn noop_can_be_called_repeatedly() {
        let metrics = NoOpMetrics;
        for _ in 0..1000 {
            metrics.record_pass(PassOutcome::Completed, 100);
            metrics.record_jobs_evaluated(3);
            metrics.record_job_skipped();
            metrics.record_violators(1);
            metrics.record_cancel(CancelOutcome::Cancelled);
            metrics.record_inventory_error("decode");
        }
    }
}
