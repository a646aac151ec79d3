//! Cancel stage: stop every selected job and sort the outcomes.
use std::{sync::Arc, time::Duration};

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use reap_model::{JobId, ReapResult, Region};

use crate::{
    metrics::{CancelOutcome, MetricsHandle},
    plane::{ControlPlane, ControlPlaneHandle},
};

/// Execution knobs for control-plane calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReapOptions {
    /// Maximum number of cancel requests in flight; `1` cancels sequentially.
    pub cancel_concurrency: usize,
    /// Upper bound for any single control-plane call.
    pub call_timeout: Duration,
}

impl Default for ReapOptions {
    fn default() -> Self {
        Self {
            cancel_concurrency: 4,
            call_timeout: Duration::from_secs(120),
        }
    }
}

/// Cancel every job in `ids` and report which cancellations were confirmed.
///
/// Each id is attempted independently; failures of one never prevent the others.
/// Every id ends up exactly once in either `success` or `failed`, and both lists
/// follow the order of `ids`.
///
/// Attempts run as detached runtime tasks: dropping the returned future does not
/// abort cancel requests that were already issued.
pub async fn reap(
    plane: ControlPlaneHandle,
    ids: Vec<JobId>,
    region: &Region,
    options: ReapOptions,
    metrics: MetricsHandle,
) -> ReapResult {
    let limit = Arc::new(Semaphore::new(options.cancel_concurrency.max(1)));

    let handles: Vec<_> = ids
        .iter()
        .map(|id| {
            let plane = Arc::clone(&plane);
            let limit = Arc::clone(&limit);
            let metrics = Arc::clone(&metrics);
            let region = region.clone();
            let id = id.clone();

            tokio::spawn(async move {
                let _permit = limit.acquire_owned().await.ok();
                let outcome = cancel_one(plane.as_ref(), &id, &region, options.call_timeout).await;
                metrics.record_cancel(outcome);
                outcome
            })
        })
        .collect();

    let mut result = ReapResult::new();
    for (id, handle) in ids.into_iter().zip(handles) {
        let outcome = match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(job = %id, error = %e, "cancel attempt aborted");
                CancelOutcome::Error
            }
        };
        result.record(id, outcome.is_success());
    }
    result
}

/// Attempt to cancel a single job and classify the outcome.
async fn cancel_one(
    plane: &dyn ControlPlane,
    id: &str,
    region: &Region,
    timeout: Duration,
) -> CancelOutcome {
    info!(job = %id, %region, "attempting to stop job");

    let outcome = match tokio::time::timeout(timeout, plane.cancel_job(id, region)).await {
        Ok(Ok(response)) if response.is_confirmed_success() => CancelOutcome::Cancelled,
        Ok(Ok(response)) => {
            debug!(job = %id, ?response, "cancel response did not confirm cancellation");
            match response.status {
                reap_model::CallStatus::Success => CancelOutcome::Unconfirmed,
                reap_model::CallStatus::Failure => CancelOutcome::Rejected,
            }
        }
        Ok(Err(e)) => {
            warn!(job = %id, error = %e, "cancel request failed");
            CancelOutcome::Error
        }
        Err(_) => {
            warn!(job = %id, ?timeout, "cancel request timed out");
            CancelOutcome::Timeout
        }
    };

    if outcome.is_success() {
        info!(job = %id, "stopped job successfully");
    } else {
        warn!(job = %id, outcome = outcome.as_label(), "failed to stop job");
    }
    outcome
}
