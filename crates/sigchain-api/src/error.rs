//! API error handling
//!
//! Maps device-manager failures onto HTTP statuses and the
//! `{"errors": [...]}` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use sigchain_manager::ManagerError;
use thiserror::Error;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid device ID")]
    InvalidDeviceId,

    #[error("invalid request body")]
    InvalidRequestBody,

    #[error("invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("device already exists")]
    DeviceExists,

    #[error("device not found")]
    DeviceNotFound,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidDeviceId
            | Self::InvalidRequestBody
            | Self::InvalidAlgorithm(_)
            | Self::DeviceExists => StatusCode::BAD_REQUEST,

            Self::DeviceNotFound => StatusCode::NOT_FOUND,

            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error messages
    pub errors: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            errors: vec![self.to_string()],
        };

        (status, Json(body)).into_response()
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::DeviceExists(_) => Self::DeviceExists,
            ManagerError::DeviceNotFound(_) => Self::DeviceNotFound,
            ManagerError::InvalidAlgorithm(name) => Self::InvalidAlgorithm(name),
            ManagerError::Crypto(err) => {
                tracing::error!(error = %err, "crypto failure");
                Self::Internal("signing failed".to_string())
            }
            ManagerError::Store(message) => {
                tracing::error!(error = %message, "storage failure");
                Self::Internal("storage failure".to_string())
            }
        }
    }
}
