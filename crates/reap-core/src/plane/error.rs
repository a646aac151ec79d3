use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlPlaneError {
    #[error("control plane call exited with {}: {stderr}", exit_code_display(*.code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("unable to decode control plane output: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("control plane unavailable: {0}")]
    Unavailable(String),
}

impl ControlPlaneError {
    /// Stable short name used for metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ControlPlaneError::NonZeroExit { .. } => "non_zero_exit",
            ControlPlaneError::Decode(_) => "decode",
            ControlPlaneError::InvalidRequest(_) => "invalid_request",
            ControlPlaneError::Io(_) => "io",
            ControlPlaneError::Unavailable(_) => "unavailable",
        }
    }

    /// Whether the same call may succeed when repeated later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ControlPlaneError::NonZeroExit { .. } | ControlPlaneError::Unavailable(_)
        )
    }
}

impl From<std::io::Error> for ControlPlaneError {
    fn from(e: std::io::Error) -> Self {
        ControlPlaneError::Io(e.to_string())
    }
}

fn exit_code_display(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}
