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

use crate::salon::QueueError;
use crate::session::SessionError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request conflicts with current state
    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<QueueError> for ApiError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::ChairOccupied => ApiError::Conflict {
                code: "CHAIR_OCCUPIED",
                message: err.to_string(),
            },
            QueueError::RequestNotFound(_) | QueueError::CustomerNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::AlreadyInQueue => ApiError::Conflict {
                code: "ALREADY_IN_QUEUE",
                message: err.to_string(),
            },
            SessionError::SalonNotFound(_) => ApiError::NotFound(err.to_string()),
            SessionError::UnknownView(_) => ApiError::Validation(err.to_string()),
            SessionError::Queue(e) => e.into(),
        }
    }
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

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict { code, .. } => (StatusCode::CONFLICT, *code),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

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
    fn test_queue_error_status() {
        let response = ApiError::from(QueueError::ChairOccupied).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = ApiError::from(QueueError::RequestNotFound(7)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_session_error_status() {
        let response = ApiError::from(SessionError::AlreadyInQueue).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = ApiError::from(SessionError::UnknownView("x".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            ApiError::from(SessionError::Queue(QueueError::CustomerNotFound(3))).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_message_is_user_facing() {
        let err = ApiError::from(QueueError::ChairOccupied);
        assert_eq!(
            err.to_string(),
            "Chair is occupied! Please complete the current service first."
        );
    }
}
