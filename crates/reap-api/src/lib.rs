//! HTTP shell around the reaper.
//!
//! Routes:
//! - `GET /` and `POST /api/v1/reap` run one reap pass and return `{"success": [...], "failed": [...]}`
//! - `GET /metrics` exposes prometheus metrics (when configured)
mod adapter;
pub use adapter::ReaperAdapter;

mod error;
pub use error::ApiError;

mod handler;
pub use handler::{PolicyOverrides, ReapHandler};

mod http;
pub use http::HttpApi;
