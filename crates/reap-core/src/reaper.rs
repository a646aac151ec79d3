//! Reap pass entry point: inventory, evaluate, cancel.
use std::{fmt, sync::Arc, time::Instant};

use tracing::{info, instrument};

use reap_model::{Job, JobId, ReapPolicy, ReapResult, Region};

use crate::{
    clock::{ClockHandle, SystemClock},
    error::CoreError,
    evaluate::evaluate,
    metrics::{MetricsHandle, PassOutcome, noop_metrics},
    plane::ControlPlaneHandle,
    reap::{ReapOptions, reap},
};

/// Outcome of one reap pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReapReport {
    /// Cancellation outcome for every violator.
    pub result: ReapResult,
    /// Number of active jobs in the inventory.
    pub evaluated: usize,
    /// Number of jobs selected for cancellation.
    pub violators: usize,
    /// Jobs left out because their creation time did not parse.
    pub skipped: Vec<JobId>,
}

/// Duration-based job reaper.
///
/// Stateless between passes; one instance may serve overlapping passes.
/// Cheap to clone.
#[derive(Clone)]
pub struct Reaper {
    plane: ControlPlaneHandle,
    clock: ClockHandle,
    metrics: MetricsHandle,
    options: ReapOptions,
}

impl Reaper {
    /// Create a reaper over `plane` with the wall clock, no metrics and default options.
    pub fn new(plane: ControlPlaneHandle) -> Self {
        Self {
            plane,
            clock: Arc::new(SystemClock),
            metrics: noop_metrics(),
            options: ReapOptions::default(),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: ClockHandle) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replace call options.
    pub fn with_options(mut self, options: ReapOptions) -> Self {
        self.options = options;
        self
    }

    /// Call options in effect.
    pub fn options(&self) -> &ReapOptions {
        &self.options
    }

    /// Run one reap pass.
    ///
    /// Steps:
    /// 1. List active jobs in `policy.region` (failure or timeout aborts the pass).
    /// 2. Select jobs running longer than `policy.max_duration`.
    /// 3. Cancel each of them and sort the outcomes.
    #[instrument(level = "info", skip(self, policy), fields(plane = self.plane.name(), region = %policy.region, max_duration = %policy.max_duration))]
    pub async fn run(&self, policy: &ReapPolicy) -> Result<ReapReport, CoreError> {
        let started = Instant::now();
        let report = self.run_pass(policy).await;

        let outcome = match &report {
            Ok(_) => PassOutcome::Completed,
            Err(CoreError::InventoryFetch { .. }) => PassOutcome::InventoryFailed,
            Err(CoreError::InventoryTimeout { .. }) => PassOutcome::InventoryTimeout,
            Err(CoreError::Internal(_)) => PassOutcome::Internal,
        };
        self.metrics
            .record_pass(outcome, started.elapsed().as_millis() as u64);
        report
    }

    /// Run one reap pass as a detached runtime task and wait for it.
    ///
    /// If the returned future is dropped (e.g. the HTTP client went away) the
    /// pass keeps running to completion, so no cancel request is left half-issued.
    pub async fn run_detached(&self, policy: ReapPolicy) -> Result<ReapReport, CoreError> {
        let this = self.clone();
        tokio::spawn(async move { this.run(&policy).await })
            .await
            .map_err(|e| CoreError::Internal(format!("reap pass aborted: {e}")))?
    }

    async fn run_pass(&self, policy: &ReapPolicy) -> Result<ReapReport, CoreError> {
        let jobs = self.fetch_inventory(&policy.region).await?;

        info!(
            jobs = jobs.len(),
            "checking for jobs that exceed configured maximum duration"
        );
        let now = self.clock.now_utc();
        let evaluation = evaluate(&jobs, policy.max_duration, now);

        self.metrics.record_jobs_evaluated(evaluation.evaluated as u64);
        self.metrics.record_violators(evaluation.violators.len() as u64);
        for _ in &evaluation.skipped {
            self.metrics.record_job_skipped();
        }

        let result = reap(
            Arc::clone(&self.plane),
            evaluation.violator_ids(),
            &policy.region,
            self.options,
            Arc::clone(&self.metrics),
        )
        .await;

        info!(
            cancelled = result.success.len(),
            failed = result.failed.len(),
            skipped = evaluation.skipped.len(),
            "reap pass finished"
        );

        Ok(ReapReport {
            result,
            evaluated: evaluation.evaluated,
            violators: evaluation.violators.len(),
            skipped: evaluation.skipped.into_iter().map(|s| s.id).collect(),
        })
    }

    async fn fetch_inventory(&self, region: &Region) -> Result<Vec<Job>, CoreError> {
        let timeout = self.options.call_timeout;
        match tokio::time::timeout(timeout, self.plane.list_active_jobs(region)).await {
            Ok(Ok(jobs)) => Ok(jobs),
            Ok(Err(source)) => {
                self.metrics.record_inventory_error(source.kind());
                Err(CoreError::InventoryFetch {
                    region: region.clone(),
                    source,
                })
            }
            Err(_) => {
                self.metrics.record_inventory_error("timeout");
                Err(CoreError::InventoryTimeout {
                    region: region.clone(),
                    timeout,
                })
            }
        }
    }
}

impl fmt::Debug for Reaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaper")
            .field("plane", &self.plane.name())
            .field("metrics", &"<handle>")
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicU64, Ordering},
        time::Duration,
    };

    use reap_model::{CancelResponse, MaxDuration};
    use time::macros::datetime;

    use super::*;
    use crate::{
        clock::FixedClock,
        metrics::{CancelOutcome, MetricsBackend},
        plane::{ControlPlaneError, MemoryControlPlane},
    };

    fn policy(max: u64) -> ReapPolicy {
        ReapPolicy::new(MaxDuration::from_minutes(max), Region::default())
    }

    fn reaper(plane: Arc<MemoryControlPlane>) -> Reaper {
        Reaper::new(plane).with_clock(Arc::new(FixedClock(datetime!(2024-01-02 00:00:00 UTC))))
    }

    #[derive(Default)]
    struct CountingMetrics {
        passes: AtomicU64,
        evaluated: AtomicU64,
        skipped: AtomicU64,
        violators: AtomicU64,
        cancelled: AtomicU64,
        cancel_failed: AtomicU64,
        inventory_errors: AtomicU64,
    }

    impl MetricsBackend for CountingMetrics {
        fn record_pass(&self, _: PassOutcome, _: u64) {
            self.passes.fetch_add(1, Ordering::SeqCst);
        }
        fn record_jobs_evaluated(&self, count: u64) {
            self.evaluated.fetch_add(count, Ordering::SeqCst);
        }
        fn record_job_skipped(&self) {
            self.skipped.fetch_add(1, Ordering::SeqCst);
        }
        fn record_violators(&self, count: u64) {
            self.violators.fetch_add(count, Ordering::SeqCst);
        }
        fn record_cancel(&self, outcome: CancelOutcome) {
            if outcome.is_success() {
                self.cancelled.fetch_add(1, Ordering::SeqCst);
            } else {
                self.cancel_failed.fetch_add(1, Ordering::SeqCst);
            }
        }
        fn record_inventory_error(&self, _: &str) {
            self.inventory_errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn reaps_only_jobs_over_the_limit() {
        let plane = Arc::new(MemoryControlPlane::new(vec![
            Job::new("J1", "2024-01-01 00:00:00"),
            Job::new("J2", "2024-01-01 23:50:00"),
        ]));

        let report = reaper(plane.clone()).run(&policy(60)).await.unwrap();

        assert_eq!(report.result.success, vec!["J1"]);
        assert!(report.result.failed.is_empty());
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.violators, 1);
        assert!(plane.is_cancelled("J1"));
        assert!(!plane.is_cancelled("J2"));
    }

    #[tokio::test]
    async fn unconfirmed_cancel_lands_in_failed() {
        let plane = Arc::new(
            MemoryControlPlane::new(vec![Job::new("J1", "2024-01-01 00:00:00")])
                .with_cancel_response("J1", Ok(CancelResponse::unconfirmed())),
        );

        let report = reaper(plane).run(&policy(60)).await.unwrap();

        assert!(report.result.success.is_empty());
        assert_eq!(report.result.failed, vec!["J1"]);
    }

    #[tokio::test]
    async fn empty_inventory_gives_empty_result() {
        let plane = Arc::new(MemoryControlPlane::new(vec![]));
        let report = reaper(plane.clone()).run(&policy(0)).await.unwrap();

        assert!(report.result.is_empty());
        assert_eq!(report.evaluated, 0);
        assert!(plane.cancel_calls().is_empty());
    }

    #[tokio::test]
    async fn inventory_failure_is_a_typed_error_without_cancels() {
        let plane = Arc::new(MemoryControlPlane::failing(ControlPlaneError::NonZeroExit {
            code: Some(1),
            stderr: "ERROR: (gcloud.dataflow.jobs.list) permission denied".into(),
        }));

        let err = reaper(plane.clone()).run(&policy(0)).await.unwrap_err();

        assert!(matches!(err, CoreError::InventoryFetch { .. }));
        assert!(plane.cancel_calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn inventory_timeout_is_retryable() {
        let plane = Arc::new(
            MemoryControlPlane::new(vec![Job::new("J1", "2024-01-01 00:00:00")])
                .with_list_delay(Duration::from_secs(300)),
        );

        let err = reaper(plane.clone())
            .with_options(ReapOptions {
                call_timeout: Duration::from_secs(10),
                ..Default::default()
            })
            .run(&policy(0))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::InventoryTimeout { .. }));
        assert!(err.is_retryable());
        assert!(plane.cancel_calls().is_empty());
    }

    #[tokio::test]
    async fn malformed_timestamps_are_skipped_and_reported() {
        let plane = Arc::new(MemoryControlPlane::new(vec![
            Job::new("broken", "yesterday"),
            Job::new("J1", "2024-01-01 00:00:00"),
        ]));

        let report = reaper(plane).run(&policy(60)).await.unwrap();

        assert_eq!(report.result.success, vec!["J1"]);
        assert_eq!(report.skipped, vec!["broken"]);
        assert_eq!(report.evaluated, 2);
    }

    #[tokio::test]
    async fn job_without_creation_time_does_not_block_other_violators() {
        let jobs = Job::list_from_json(
            br#"[{"id":"J0","creationTime":null},{"id":"J1","creationTime":"2024-01-01 00:00:00"}]"#,
        )
        .unwrap();
        let plane = Arc::new(MemoryControlPlane::new(jobs));

        let report = reaper(plane.clone()).run(&policy(60)).await.unwrap();

        assert_eq!(report.result.success, vec!["J1"]);
        assert!(report.result.failed.is_empty());
        assert_eq!(report.skipped, vec!["J0"]);
        assert!(!plane.is_cancelled("J0"));
    }

    #[tokio::test]
    async fn overlapping_passes_report_late_cancel_as_failure() {
        let plane = Arc::new(MemoryControlPlane::new(vec![Job::new(
            "J1",
            "2024-01-01 00:00:00",
        )]));
        let reaper = reaper(plane.clone());

        // Both passes observe J1 before either cancels it.
        let stale_ids = vec!["J1".to_string()];
        let first = reaper.run(&policy(60)).await.unwrap();
        let second = reap(
            plane.clone(),
            stale_ids,
            &Region::default(),
            ReapOptions::default(),
            noop_metrics(),
        )
        .await;

        assert_eq!(first.result.success, vec!["J1"]);
        assert_eq!(second.failed, vec!["J1"]);
        assert!(second.success.is_empty());
    }

    #[tokio::test]
    async fn metrics_follow_the_pass() {
        let metrics = Arc::new(CountingMetrics::default());
        let plane = Arc::new(
            MemoryControlPlane::new(vec![
                Job::new("J1", "2024-01-01 00:00:00"),
                Job::new("J2", "2024-01-01 00:00:00"),
                Job::new("J3", "not a date"),
                Job::new("J4", "2024-01-01 23:59:00"),
            ])
            .with_cancel_response("J2", Ok(CancelResponse::failed())),
        );

        reaper(plane)
            .with_metrics(metrics.clone())
            .run(&policy(60))
            .await
            .unwrap();

        assert_eq!(metrics.passes.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.evaluated.load(Ordering::SeqCst), 4);
        assert_eq!(metrics.skipped.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.violators.load(Ordering::SeqCst), 2);
        assert_eq!(metrics.cancelled.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.cancel_failed.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.inventory_errors.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn inventory_errors_are_counted() {
        let metrics = Arc::new(CountingMetrics::default());
        let plane = Arc::new(MemoryControlPlane::failing(ControlPlaneError::Decode(
            "expected value".into(),
        )));

        let _ = reaper(plane)
            .with_metrics(metrics.clone())
            .run(&policy(60))
            .await;

        assert_eq!(metrics.passes.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.inventory_errors.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn detached_pass_returns_the_same_report() {
        let plane = Arc::new(MemoryControlPlane::new(vec![Job::new(
            "J1",
            "2024-01-01 00:00:00",
        )]));

        let report = reaper(plane).run_detached(policy(60)).await.unwrap();
        assert_eq!(report.result.success, vec!["J1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_caller_does_not_abandon_cancellations() {
        let plane = Arc::new(
            MemoryControlPlane::new(vec![Job::new("J1", "2024-01-01 00:00:00")])
                .with_cancel_delay(Duration::from_secs(5)),
        );
        let reaper = reaper(plane.clone());

        let caller = tokio::spawn(async move { reaper.run_detached(policy(60)).await });

        // abort only once the cancel request is in flight
        for _ in 0..100 {
            if !plane.cancel_calls().is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        assert_eq!(plane.cancel_calls(), vec!["J1"]);
        caller.abort();
        assert!(caller.await.unwrap_err().is_cancelled());

        // paused clock: sleeps auto-advance once every task is idle
        for _ in 0..100 {
            if plane.is_cancelled("J1") {
                break;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        assert!(plane.is_cancelled("J1"));
    }
}
