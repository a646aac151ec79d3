use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;

use reap_core::CoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Reap(#[from] CoreError),

    #[error("metrics unavailable: {0}")]
    Metrics(String),
}

/// JSON body of every error response.
///
/// Deliberately has no `success`/`failed` fields so a failed pass can never be
/// mistaken for a pass that found nothing to cancel.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    kind: &'static str,
    retryable: bool,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Reap(CoreError::InventoryFetch { .. }) => StatusCode::BAD_GATEWAY,
            ApiError::Reap(CoreError::InventoryTimeout { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Reap(CoreError::Internal(_)) | ApiError::Metrics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "invalid_request",
            ApiError::Reap(e) => e.kind(),
            ApiError::Metrics(_) => "metrics",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            ApiError::Reap(e) => e.is_retryable(),
            _ => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
            retryable: self.retryable(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reap_core::ControlPlaneError;
    use reap_model::Region;

    use super::*;

    #[test]
    fn inventory_failure_maps_to_bad_gateway() {
        let err = ApiError::from(CoreError::InventoryFetch {
            region: Region::default(),
            source: ControlPlaneError::Io("gcloud not found".into()),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.kind(), "inventory_fetch");
        assert!(!err.retryable());
    }

    #[test]
    fn inventory_timeout_maps_to_service_unavailable() {
        let err = ApiError::from(CoreError::InventoryTimeout {
            region: Region::default(),
            timeout: Duration::from_secs(120),
        });
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.retryable());
    }

    #[test]
    fn invalid_request_maps_to_bad_request() {
        let err = ApiError::InvalidRequest("bad region".into());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
