use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid creation time '{value}': {reason}")]
    InvalidCreationTime { value: String, reason: String },

    #[error("invalid region '{0}': expected lowercase letters, digits and '-'")]
    InvalidRegion(String),

    #[error("invalid maximum duration '{0}': expected a non-negative number of minutes")]
    InvalidMaxDuration(String),

    #[error("invalid job listing: {0}")]
    InvalidListing(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
