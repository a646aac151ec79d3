use std::sync::Arc;

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use reap_core::{CancelOutcome, MetricsBackend, PassOutcome};

const NAMESPACE: &str = "reap";

/// Prometheus metrics backend for the reaper.
///
/// ## Label cardinality
/// All labels are bounded:
/// - `outcome` (passes): "completed", "inventory_failed", "inventory_timeout", "internal"
/// - `outcome` (cancellations): "cancelled", "unconfirmed", "rejected", "error", "timeout"
/// - `error_kind`: "non_zero_exit", "decode", "io", "timeout", ...
#[derive(Clone)]
pub struct PrometheusMetrics {
    passes: IntCounterVec,
    pass_duration: Histogram,
    jobs_evaluated: IntCounter,
    jobs_skipped: IntCounter,
    violators: IntCounter,
    cancellations: IntCounterVec,
    inventory_errors: IntCounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a new prometheus metrics backend with custom registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let passes = IntCounterVec::new(
            Opts::new("passes_total", "Total number of reap passes").namespace(NAMESPACE),
            &["outcome"],
        )?;
        registry.register(Box::new(passes.clone()))?;

        let pass_duration = Histogram::with_opts(
            HistogramOpts::new("pass_duration_seconds", "Reap pass duration in seconds")
                .namespace(NAMESPACE)
                .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        )?;
        registry.register(Box::new(pass_duration.clone()))?;

        let jobs_evaluated = IntCounter::with_opts(
            Opts::new("jobs_evaluated_total", "Total number of active jobs evaluated")
                .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(jobs_evaluated.clone()))?;

        let jobs_skipped = IntCounter::with_opts(
            Opts::new(
                "jobs_skipped_total",
                "Total number of jobs skipped because of an unparseable creation time",
            )
            .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(jobs_skipped.clone()))?;

        let violators = IntCounter::with_opts(
            Opts::new(
                "violators_total",
                "Total number of jobs found exceeding the maximum duration",
            )
            .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(violators.clone()))?;

        let cancellations = IntCounterVec::new(
            Opts::new("cancellations_total", "Total number of cancel attempts").namespace(NAMESPACE),
            &["outcome"],
        )?;
        registry.register(Box::new(cancellations.clone()))?;

        let inventory_errors = IntCounterVec::new(
            Opts::new("inventory_errors_total", "Total inventory query failures")
                .namespace(NAMESPACE),
            &["error_kind"],
        )?;
        registry.register(Box::new(inventory_errors.clone()))?;

        Ok(Self {
            passes,
            pass_duration,
            jobs_evaluated,
            jobs_skipped,
            violators,
            cancellations,
            inventory_errors,
            registry,
        })
    }

    /// Create a new prometheus metrics backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in the prometheus text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Get reference to underlying prometheus registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_pass(&self, outcome: PassOutcome, duration_ms: u64) {
        self.passes.with_label_values(&[outcome.as_label()]).inc();
        self.pass_duration.observe(duration_ms as f64 / 1000.0);
    }

    fn record_jobs_evaluated(&self, count: u64) {
        self.jobs_evaluated.inc_by(count);
    }

    fn record_job_skipped(&self) {
        self.jobs_skipped.inc();
    }

    fn record_violators(&self, count: u64) {
        self.violators.inc_by(count);
    }

    fn record_cancel(&self, outcome: CancelOutcome) {
        self.cancellations
            .with_label_values(&[outcome.as_label()])
            .inc();
    }

    fn record_inventory_error(&self, error_kind: &str) {
        self.inventory_errors.with_label_values(&[error_kind]).inc();
    }
}
