//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pledge_analytics::AnalyticsError;
use pledge_ingest::IngestError;
use pledge_traits::TraitError;

/// API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upload header lacks required columns.
    #[error("{0}")]
    Schema(String),

    /// Upload could not be decoded as CSV.
    #[error("{0}")]
    MalformedFile(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upload exceeds the configured limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored amounts could not be totalled.
    #[error("Aggregation error: {0}")]
    Aggregation(String),
}

impl ApiError {
    /// HTTP status and machine-readable code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Schema(_) => (StatusCode::UNPROCESSABLE_ENTITY, "SCHEMA_ERROR"),
            ApiError::MalformedFile(_) => (StatusCode::BAD_REQUEST, "MALFORMED_FILE"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Aggregation(_) => (StatusCode::INTERNAL_SERVER_ERROR, "AGGREGATION_ERROR"),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorBody,
}

/// Error body details.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable kind, e.g. `NOT_FOUND`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

// Conversions from domain errors
impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Schema { .. } => ApiError::Schema(err.to_string()),
            IngestError::Malformed(_) => ApiError::MalformedFile(err.to_string()),
            IngestError::Storage(e) => e.into(),
        }
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::NotFound { id } => {
                ApiError::NotFound(format!("Investor '{id}' not found"))
            }
            AnalyticsError::Storage(e) => e.into(),
            AnalyticsError::Arithmetic(e) => ApiError::Aggregation(e.to_string()),
        }
    }
}

impl From<TraitError> for ApiError {
    fn from(err: TraitError) -> Self {
        ApiError::Storage(err.to_string())
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
