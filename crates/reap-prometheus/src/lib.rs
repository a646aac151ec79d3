//! Prometheus metrics backend for the job reaper.
//!
//! Provides [`PrometheusMetrics`], an implementation of [`reap_core::MetricsBackend`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use reap_core::{MemoryControlPlane, Reaper};
//! use reap_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let reaper = Reaper::new(Arc::new(MemoryControlPlane::new(vec![])))
//!     .with_metrics(Arc::new(metrics.clone()));
//!
//! // body of a `/metrics` response
//! let text = metrics.encode_text()?;
//! # let _ = (reaper, text);
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `reap_passes_total{outcome}` - Counter
//! - `reap_pass_duration_seconds` - Histogram
//! - `reap_jobs_evaluated_total` - Counter
//! - `reap_jobs_skipped_total` - Counter
//! - `reap_violators_total` - Counter
//! - `reap_cancellations_total{outcome}` - Counter
//! - `reap_inventory_errors_total{error_kind}` - Counter

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
