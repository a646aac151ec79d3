//! Metrics collection abstraction for reap passes.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected into [`crate::Reaper`].
mod backend;
pub use backend::{CancelOutcome, MetricsBackend, MetricsHandle, PassOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
