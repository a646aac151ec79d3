use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use reap_model::{CancelResponse, Job, JobId, Region};

use crate::plane::{ControlPlane, ControlPlaneError};

/// In-memory control plane.
///
/// Serves a fixed inventory and behaves like the real system on cancel: the first
/// cancel of an active job is confirmed, any later cancel of the same job is reported
/// as a failure (the job is already terminal). Individual responses can be scripted.
/// Useful for tests and dry runs.
#[derive(Debug)]
pub struct MemoryControlPlane {
    inventory: Mutex<Result<Vec<Job>, ControlPlaneError>>,
    scripted: Mutex<HashMap<JobId, Result<CancelResponse, ControlPlaneError>>>,
    cancelled: Mutex<HashSet<JobId>>,
    calls: Mutex<Vec<JobId>>,
    list_delay: Option<Duration>,
    cancel_delay: Option<Duration>,
}

impl Default for MemoryControlPlane {
    fn default() -> Self {
        Self {
            inventory: Mutex::new(Ok(Vec::new())),
            scripted: Mutex::default(),
            cancelled: Mutex::default(),
            calls: Mutex::default(),
            list_delay: None,
            cancel_delay: None,
        }
    }
}

impl MemoryControlPlane {
    /// Control plane serving `jobs` as the active inventory.
    pub fn new(jobs: Vec<Job>) -> Self {
        Self {
            inventory: Mutex::new(Ok(jobs)),
            ..Default::default()
        }
    }

    /// Control plane whose inventory query always fails with `err`.
    pub fn failing(err: ControlPlaneError) -> Self {
        Self {
            inventory: Mutex::new(Err(err)),
            ..Default::default()
        }
    }

    /// Script the response of cancel requests for `id`.
    pub fn with_cancel_response(
        self,
        id: impl Into<JobId>,
        response: Result<CancelResponse, ControlPlaneError>,
    ) -> Self {
        lock(&self.scripted).insert(id.into(), response);
        self
    }

    /// Delay every inventory query.
    pub fn with_list_delay(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    /// Delay every cancel request.
    pub fn with_cancel_delay(mut self, delay: Duration) -> Self {
        self.cancel_delay = Some(delay);
        self
    }

    /// Ids passed to `cancel_job`, in call order.
    pub fn cancel_calls(&self) -> Vec<JobId> {
        lock(&self.calls).clone()
    }

    /// Whether `id` was cancelled by this control plane.
    pub fn is_cancelled(&self, id: &str) -> bool {
        lock(&self.cancelled).contains(id)
    }
}

#[async_trait]
impl ControlPlane for MemoryControlPlane {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list_active_jobs(&self, _region: &Region) -> Result<Vec<Job>, ControlPlaneError> {
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        let cancelled = lock(&self.cancelled).clone();
        lock(&self.inventory)
            .clone()
            .map(|jobs| jobs.into_iter().filter(|j| !cancelled.contains(&j.id)).collect())
    }

    async fn cancel_job(
        &self,
        id: &str,
        _region: &Region,
    ) -> Result<CancelResponse, ControlPlaneError> {
        lock(&self.calls).push(id.to_string());
        if let Some(delay) = self.cancel_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(response) = lock(&self.scripted).get(id) {
            return response.clone();
        }

        let known = match &*lock(&self.inventory) {
            Ok(jobs) => jobs.iter().any(|j| j.id == id),
            Err(_) => false,
        };
        if !known {
            return Ok(CancelResponse::failed());
        }
        if lock(&self.cancelled).insert(id.to_string()) {
            Ok(CancelResponse::confirmed())
        } else {
            Ok(CancelResponse::failed())
        }
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
