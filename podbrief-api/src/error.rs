//! API error type and the `{success: false, error}` envelope
//!
//! Internal failures are logged with full detail here; clients only ever see
//! a short, fixed message for 5xx responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::services::PipelineError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Internal server error (500); the message is safe to show clients
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation(message) => ApiError::BadRequest(message),
            PipelineError::InsufficientContent { chars } => {
                tracing::info!(chars, "Rejected request with too little fetched content");
                ApiError::BadRequest(
                    "Could not extract enough information from the provided URLs.".to_string(),
                )
            }
            PipelineError::ModelCall(e) => {
                error!(error = %e, "Completion API call failed");
                ApiError::Internal("The language model request failed".to_string())
            }
            PipelineError::MalformedModelOutput(detail) => {
                error!(detail = %detail, "Model output rejected");
                ApiError::Internal("The language model returned an unusable response".to_string())
            }
            PipelineError::Storage(e) => ApiError::from(e),
        }
    }
}

impl From<podbrief_common::Error> for ApiError {
    fn from(err: podbrief_common::Error) -> Self {
        error!(error = %err, "Storage error");
        ApiError::Internal("Database error".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
