use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid control plane configuration: {0}")]
    InvalidConfig(String),
}
