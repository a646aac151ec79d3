mod domain;
pub use domain::{DEFAULT_MAX_DURATION_MINUTES, DEFAULT_REGION};
pub use domain::{JobId, MaxDuration, Region};

mod error;
pub use error::{ModelError, ModelResult};

mod job;
pub use job::{CallStatus, CancelResponse, CreationTime, Job};

mod policy;
pub use policy::ReapPolicy;

mod result;
pub use result::ReapResult;
