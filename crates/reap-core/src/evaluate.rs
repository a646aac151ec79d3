//! Inventory evaluation: select jobs running longer than the configured maximum.
use time::OffsetDateTime;
use tracing::{info, warn};

use reap_model::{CreationTime, Job, JobId, MaxDuration, ModelError};

/// Job selected for cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violator {
    pub id: JobId,
    pub creation: CreationTime,
    pub elapsed_minutes: i64,
}

/// Inventory entry left out of the evaluation because its creation time did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedJob {
    pub id: JobId,
    pub reason: ModelError,
}

/// Result of evaluating one inventory snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Number of inventory entries looked at.
    pub evaluated: usize,
    /// Violators, in inventory order.
    pub violators: Vec<Violator>,
    /// Entries with a malformed creation time.
    pub skipped: Vec<SkippedJob>,
}

impl Evaluation {
    /// Violator ids in inventory order.
    pub fn violator_ids(&self) -> Vec<JobId> {
        self.violators.iter().map(|v| v.id.clone()).collect()
    }
}

/// Select every job whose elapsed running time, measured against `now`, exceeds `max`.
///
/// A job with a malformed creation time is skipped (and reported in
/// [`Evaluation::skipped`]); it never aborts the evaluation of the others.
pub fn evaluate(jobs: &[Job], max: MaxDuration, now: OffsetDateTime) -> Evaluation {
    let mut out = Evaluation {
        evaluated: jobs.len(),
        ..Default::default()
    };

    for job in jobs {
        let creation = match job.creation() {
            Ok(creation) => creation,
            Err(reason) => {
                warn!(job = %job.id, creation_time = ?job.creation_time, error = %reason, "skipping job with unparseable creation time");
                out.skipped.push(SkippedJob {
                    id: job.id.clone(),
                    reason,
                });
                continue;
            }
        };

        let elapsed_minutes = creation.elapsed_minutes(now);
        if max.is_exceeded_by(elapsed_minutes) {
            info!(
                job = %job.id,
                creation_time = %creation,
                duration_minutes = elapsed_minutes,
                "found job violating maximum duration"
            );
            out.violators.push(Violator {
                id: job.id.clone(),
                creation,
                elapsed_minutes,
            });
        }
    }
    out
}
