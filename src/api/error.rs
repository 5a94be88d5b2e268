//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::pricing::PricingError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Cost calculation or currency conversion failed
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Input files could not be loaded at start-up
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status and machine-readable code
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Pricing(PricingError::UnknownCurrency(_)) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_CURRENCY")
            }
            ApiError::Pricing(PricingError::InvalidQuantity { .. }) => {
                (StatusCode::BAD_REQUEST, "INVALID_QUANTITY")
            }
            ApiError::Pricing(PricingError::InvalidRate { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_RATE")
            }
            ApiError::DataUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "DATA_UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(PricingError::UnknownCurrency("EUR".to_string()));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::BAD_REQUEST, "UNKNOWN_CURRENCY")
        );
        assert_eq!(err.to_string(), "Pricing error: Unknown currency: EUR");

        let err = ApiError::DataUnavailable("File not found: states.csv".to_string());
        assert_eq!(err.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);
    }
}
