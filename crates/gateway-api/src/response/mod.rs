//! Response types and error handling for API endpoints
//!
//! Provides unified error handling and JSON response formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gateway_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

/// API error type for consistent error responses.
///
/// Whatever the originating layer, the wire representation collapses to one
/// of the stable machine codes: `VALIDATION_ERROR`, `INVALID_CREDENTIALS`,
/// `AUTH_REQUIRED`, `NOT_FOUND`, `CONFLICT`, `INTERNAL_ERROR`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Authentication required")]
    AuthRequired,
}

impl ApiError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::AuthRequired => StatusCode::UNAUTHORIZED,
        }
    }

    /// Get the stable machine code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Service(e) => match e.status_code() {
                400 => "VALIDATION_ERROR",
                // The only 401 the service layer raises itself is a failed
                // credential check; everything token-shaped comes through
                // `AuthRequired` instead.
                401 if e.error_code() == "INVALID_CREDENTIALS" => "INVALID_CREDENTIALS",
                401 => "AUTH_REQUIRED",
                404 => "NOT_FOUND",
                409 => "CONFLICT",
                _ => "INTERNAL_ERROR",
            },
            Self::Validation(_) | Self::BadRequest(_) => "VALIDATION_ERROR",
            Self::AuthRequired => "AUTH_REQUIRED",
        }
    }

    /// Create a bad-request error with a custom message
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail for API responses
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().to_string();

        // Server errors log the real cause and answer with a safe message
        let message = if status.is_server_error() {
            error!(error = ?self, "Server error occurred");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let details = if let Self::Validation(errors) = &self {
            Some(serde_json::to_value(errors).unwrap_or_default())
        } else {
            None
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Created response (201) with JSON body
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = self.0.into_response();
        *response.status_mut() = StatusCode::CREATED;
        response
    }
}

/// No content response (204)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
