// Error handling types for the API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use tracing::error;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
    InternalServer(String),
    DatabaseError(sqlx::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
        }
    }
}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message, code) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            ApiError::InternalServer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "INTERNAL_SERVER_ERROR",
            ),
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    "DATABASE_ERROR",
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}
