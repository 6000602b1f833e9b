//! REST error type with structured JSON bodies.

use api_shared::{ErrorBody, ErrorDetail};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use triage_core::CoreError;

/// REST-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid intake: {0}")]
    InvalidIntake(String),
    #[error("Guidance service failed: {0}")]
    Upstream(String),
    #[error("Guidance service timed out: {0}")]
    UpstreamTimeout(String),
    #[error("Malformed guidance: {0}")]
    MalformedGuidance(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidIntake(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INTAKE"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_FAILURE"),
            ApiError::UpstreamTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            ApiError::MalformedGuidance(_) => (StatusCode::BAD_GATEWAY, "MALFORMED_GUIDANCE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                "An internal error occurred".to_string()
            }
            ApiError::Upstream(detail)
            | ApiError::UpstreamTimeout(detail)
            | ApiError::MalformedGuidance(detail) => {
                tracing::error!(%detail, code, "guidance generation failed");
                detail
            }
            ApiError::InvalidIntake(detail) => {
                tracing::warn!(%detail, code, "request rejected");
                detail
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_validation() {
            return ApiError::InvalidIntake(err.to_string());
        }
        match err {
            CoreError::UpstreamTimeout(_) => ApiError::UpstreamTimeout(err.to_string()),
            CoreError::UpstreamTransport(_)
            | CoreError::UpstreamStatus { .. }
            | CoreError::UpstreamDecode(_) => ApiError::Upstream(err.to_string()),
            CoreError::MalformedGuidance(_) => ApiError::MalformedGuidance(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

// Unparseable bodies, wrong content types and shape mismatches are all input errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidIntake(rejection.body_text())
    }
}
