use std::fmt;

use crate::ExecError;

/// Settings of the `gcloud` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcloudConfig {
    /// Program to execute (e.g. `"gcloud"`, `"/usr/lib/google-cloud-sdk/bin/gcloud"`).
    pub program: String,
    /// Arguments inserted before the `dataflow ...` arguments.
    ///
    /// Allows wrapping the CLI, e.g. `program = "docker"` with
    /// `base_args = ["run", "--rm", "google/cloud-sdk", "gcloud"]`.
    pub base_args: Vec<String>,
    /// Project to operate on; the CLI default project when `None`.
    pub project: Option<String>,
    /// Max length of stderr kept in error messages.
    pub max_error_len: usize,
}

impl Default for GcloudConfig {
    fn default() -> Self {
        Self {
            program: "gcloud".to_string(),
            base_args: Vec::new(),
            project: None,
            max_error_len: 4096,
        }
    }
}

impl GcloudConfig {
    /// Validate the configuration before any command is spawned.
    ///
    /// Rules:
    /// - `program` is not empty or whitespace-only;
    /// - `project`, if set, is non-empty, does not start with `-` and contains no whitespace;
    /// - `max_error_len` is not zero.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.program.trim().is_empty() {
            return Err(ExecError::InvalidConfig("gcloud program is empty".into()));
        }
        if let Some(project) = &self.project {
            if project.is_empty()
                || project.starts_with('-')
                || project.chars().any(char::is_whitespace)
            {
                return Err(ExecError::InvalidConfig(format!(
                    "invalid project id: '{project}'"
                )));
            }
        }
        if self.max_error_len == 0 {
            return Err(ExecError::InvalidConfig(
                "max_error_len cannot be zero".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for GcloudConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GcloudConfig(program='{}', base_args={}, project={:?})",
            self.program,
            self.base_args.len(),
            self.project,
        )
    }
}
