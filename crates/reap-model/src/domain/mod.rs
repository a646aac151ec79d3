mod constants;
pub use constants::{DEFAULT_MAX_DURATION_MINUTES, DEFAULT_REGION};

mod region;
pub use region::Region;

mod duration;
pub use duration::MaxDuration;

/// Opaque job identifier assigned by the control plane.
///
/// Never parsed or generated locally; only echoed back in cancel requests and reports.
pub type JobId = String;
