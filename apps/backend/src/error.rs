//! Error handling for the wallboard API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "io_error"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        // Backend detail stays in the server log; clients get a fixed message.
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database operation failed");
                "storage operation failed".to_string()
            }
            ApiError::Io(e) => {
                tracing::error!(error = %e, "filesystem operation failed");
                "filesystem operation failed".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("quote 123".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("missing field".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_status() {
        let error = ApiError::Conflict("file already exists".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::Internal("unexpected error".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_database_error_status() {
        let error = ApiError::Database(sqlx::Error::PoolClosed);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_io_error_status() {
        let error = ApiError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display_not_found() {
        let error = ApiError::NotFound("quote 123".to_string());
        assert_eq!(error.to_string(), "Not found: quote 123");
    }

    #[test]
    fn test_error_display_bad_request() {
        let error = ApiError::BadRequest("content must not be empty".to_string());
        assert_eq!(error.to_string(), "Bad request: content must not be empty");
    }

    #[tokio::test]
    async fn test_database_error_body_is_sanitized() {
        let error = ApiError::Database(sqlx::Error::PoolClosed);
        let response = error.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "database_error");
        assert_eq!(body["message"], "storage operation failed");
    }

    #[tokio::test]
    async fn test_io_error_body_is_sanitized() {
        let error = ApiError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"));
        let response = error.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "filesystem operation failed");
        assert!(!body["message"].as_str().unwrap().contains("disk on fire"));
    }
}
