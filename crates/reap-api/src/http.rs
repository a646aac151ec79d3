use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;

use reap_model::{MaxDuration, Region};
use reap_prometheus::PrometheusMetrics;

use crate::{
    error::ApiError,
    handler::{PolicyOverrides, ReapHandler},
};

const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
    metrics: Option<PrometheusMetrics>,
}

impl<H> HttpApi<H>
where
    H: ReapHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            metrics: None,
        }
    }

    /// Expose `metrics` at `GET /metrics`.
    pub fn with_metrics(mut self, metrics: PrometheusMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET / - Run a reap pass (trigger entry point)
    /// - POST /api/v1/reap - Run a reap pass
    /// - GET /metrics - Prometheus text exposition (only with [`HttpApi::with_metrics`])
    pub fn router(self) -> Router {
        let router = Router::new()
            .route("/", get(trigger_pass::<H>))
            .route("/api/v1/reap", post(trigger_pass::<H>))
            .with_state(self.handler);

        match self.metrics {
            Some(metrics) => router.merge(
                Router::new()
                    .route("/metrics", get(render_metrics))
                    .with_state(metrics),
            ),
            None => router,
        }
    }
}

/// Optional per-invocation overrides; raw strings so parse errors map to 400 with our message.
#[derive(Debug, Default, Deserialize)]
struct ReapQuery {
    max_duration_minutes: Option<String>,
    region: Option<String>,
}

impl ReapQuery {
    fn into_overrides(self) -> Result<PolicyOverrides, ApiError> {
        let max_duration = self
            .max_duration_minutes
            .map(|raw| raw.parse::<MaxDuration>())
            .transpose()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let region = self
            .region
            .map(|raw| raw.parse::<Region>())
            .transpose()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        Ok(PolicyOverrides {
            max_duration,
            region,
        })
    }
}

/// GET / and POST /api/v1/reap
///
/// Query params:
/// - ?max_duration_minutes=N - override the threshold for this pass
/// - ?region=name - override the region for this pass
async fn trigger_pass<H>(
    State(handler): State<Arc<H>>,
    query: Result<Query<ReapQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ReapHandler,
{
    let Query(query) = query.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let overrides = query.into_overrides()?;
    let result = handler.run_pass(overrides).await?;
    Ok(Json(result))
}

/// GET /metrics
async fn render_metrics(
    State(metrics): State<PrometheusMetrics>,
) -> Result<impl IntoResponse, ApiError> {
    let body = metrics
        .encode_text()
        .map_err(|e| ApiError::Metrics(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body))
}
