mod error;
pub use error::ExecError;

mod command;

#[cfg(feature = "gcloud")]
pub mod gcloud;
