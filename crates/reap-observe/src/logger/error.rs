use thiserror::Error;

/// Errors raised while configuring or installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format '{0}', expected one of: text, json, journald")]
    InvalidFormat(String),

    #[error("log filter rejected: {0}")]
    InvalidLevel(String),

    #[error("journald output requested on a platform without journald")]
    JournaldNotSupported,

    #[error("journald socket unavailable: {0}")]
    JournaldInitFailed(String),

    /// A global subscriber was installed earlier in the process.
    #[error("global subscriber already installed")]
    AlreadyInitialized,
}

pub type LoggerResult<T> = Result<T, LoggerError>;
