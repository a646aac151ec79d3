//! `ControlPlane` backed by the `gcloud dataflow jobs` CLI.
//!
//! - list: `gcloud dataflow jobs list --status=active --region=<r> --format=json`
//! - cancel: `gcloud dataflow jobs cancel <id> --region=<r>`
mod config;
pub use config::GcloudConfig;

use async_trait::async_trait;
use tracing::{debug, warn};

use reap_core::{ControlPlane, ControlPlaneError};
use reap_model::{CallStatus, CancelResponse, Job, Region};

use crate::{ExecError, command};

/// Text the CLI prints once a cancel request has been accepted.
pub const CANCEL_CONFIRMATION: &str = "Cancelled job";

/// Control plane that shells out to `gcloud`.
#[derive(Debug, Clone)]
pub struct GcloudControlPlane {
    config: GcloudConfig,
}

impl GcloudControlPlane {
    /// Create a control plane using the `gcloud` binary from `PATH`.
    pub fn new() -> Self {
        Self {
            config: GcloudConfig::default(),
        }
    }

    /// Create a control plane with explicit configuration.
    pub fn with_config(config: GcloudConfig) -> Result<Self, ExecError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use.
    pub fn config(&self) -> &GcloudConfig {
        &self.config
    }

    fn list_args(&self, region: &Region) -> Vec<String> {
        let mut args = self.config.base_args.clone();
        args.extend([
            "dataflow".to_string(),
            "jobs".to_string(),
            "list".to_string(),
            "--status=active".to_string(),
            format!("--region={region}"),
            "--format=json".to_string(),
        ]);
        self.push_project(&mut args);
        args
    }

    fn cancel_args(&self, id: &str, region: &Region) -> Vec<String> {
        let mut args = self.config.base_args.clone();
        args.extend([
            "dataflow".to_string(),
            "jobs".to_string(),
            "cancel".to_string(),
            id.to_string(),
            format!("--region={region}"),
        ]);
        self.push_project(&mut args);
        args
    }

    fn push_project(&self, args: &mut Vec<String>) {
        if let Some(project) = &self.config.project {
            args.push(format!("--project={project}"));
        }
    }
}

impl Default for GcloudControlPlane {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ControlPlane for GcloudControlPlane {
    fn name(&self) -> &'static str {
        "gcloud"
    }

    async fn list_active_jobs(&self, region: &Region) -> Result<Vec<Job>, ControlPlaneError> {
        let out = command::run(&self.config.program, &self.list_args(region)).await?;
        if !out.success {
            return Err(ControlPlaneError::NonZeroExit {
                code: out.code,
                stderr: out.stderr_excerpt(self.config.max_error_len),
            });
        }

        let jobs = Job::list_from_json(&out.stdout)
            .map_err(|e| ControlPlaneError::Decode(e.to_string()))?;
        debug!(%region, jobs = jobs.len(), "listed active jobs");
        Ok(jobs)
    }

    async fn cancel_job(
        &self,
        id: &str,
        region: &Region,
    ) -> Result<CancelResponse, ControlPlaneError> {
        if !is_valid_job_id(id) {
            return Err(ControlPlaneError::InvalidRequest(format!(
                "refusing to pass job id '{id}' to gcloud"
            )));
        }

        let out = command::run(&self.config.program, &self.cancel_args(id, region)).await?;
        let confirmed = out.combined().contains(CANCEL_CONFIRMATION);
        if !out.success {
            warn!(
                job = %id,
                code = ?out.code,
                stderr = %out.stderr_excerpt(self.config.max_error_len),
                "gcloud cancel exited with failure"
            );
        }

        Ok(CancelResponse {
            status: if out.success {
                CallStatus::Success
            } else {
                CallStatus::Failure
            },
            confirmed,
        })
    }
}

/// Job ids are passed as a positional argument, so they must not look like flags.
fn is_valid_job_id(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('-')
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
