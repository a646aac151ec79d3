//! Common model-level constants.
//!
//! Defaults applied when the deployment leaves a setting unset.

/// Maximum job duration (in minutes) used when no threshold is configured.
///
/// Roughly 190 years, i.e. the reaper never selects anything unless a real limit is set.
pub const DEFAULT_MAX_DURATION_MINUTES: u64 = 99_999_999;

/// Region queried when no region is configured.
pub const DEFAULT_REGION: &str = "us-central1";
