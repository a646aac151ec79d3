pub mod clock;
pub mod error;
pub mod evaluate;
pub mod metrics;
pub mod plane;
pub mod reap;
pub mod reaper;

pub use clock::{Clock, ClockHandle, FixedClock, SystemClock};
pub use error::CoreError;
pub use evaluate::{Evaluation, SkippedJob, Violator, evaluate};
pub use metrics::{CancelOutcome, MetricsBackend, MetricsHandle, NoOpMetrics, PassOutcome, noop_metrics};
pub use plane::{ControlPlane, ControlPlaneError, ControlPlaneHandle, MemoryControlPlane};
pub use reap::{ReapOptions, reap};
pub use reaper::{ReapReport, Reaper};

pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::plane::{ControlPlane, ControlPlaneError};
    pub use crate::reap::ReapOptions;
    pub use crate::reaper::{ReapReport, Reaper};
}
