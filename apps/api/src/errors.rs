#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::ingest::IngestError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Analysis(err) => {
                let (status, code) = analysis_status(err);
                if status.is_server_error() {
                    tracing::error!("Analysis error: {err}");
                }
                (status, code, err.to_string())
            }
            AppError::Ingest(err) => {
                let status = match err {
                    IngestError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, "INGEST_ERROR", err.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

fn analysis_status(err: &AnalysisError) -> (StatusCode, &'static str) {
    match err {
        AnalysisError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
        AnalysisError::PreconditionNotMet(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "PRECONDITION_NOT_MET")
        }
        AnalysisError::StageBusy => (StatusCode::CONFLICT, "STAGE_BUSY"),
        AnalysisError::Superseded => (StatusCode::CONFLICT, "SUPERSEDED"),
        AnalysisError::SessionNotFound => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
        AnalysisError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
        AnalysisError::QuotaExhausted => (StatusCode::PAYMENT_REQUIRED, "QUOTA_EXHAUSTED"),
        AnalysisError::UpstreamUnavailable(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
        AnalysisError::MalformedResponse(_) => (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_maps_to_429() {
        let (status, _) = analysis_status(&AnalysisError::RateLimited);
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_quota_exhausted_maps_to_402() {
        let (status, _) = analysis_status(&AnalysisError::QuotaExhausted);
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_precondition_maps_to_422() {
        let (status, _) =
            analysis_status(&AnalysisError::PreconditionNotMet("profile first".to_string()));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_upstream_failures_map_to_502() {
        let (status, _) = analysis_status(&AnalysisError::UpstreamUnavailable("down".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let (status, _) = analysis_status(&AnalysisError::MalformedResponse("bad".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
