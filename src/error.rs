//! Error types for GestEPI server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes returned in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchUser = 4,
    NoSuchEpi = 5,
    NoSuchCheck = 6,
    Duplicate = 7,
    BadValue = 8,
    NoSuchData = 9,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {1}")]
    NotFound(ErrorCode, String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(code, msg) => (StatusCode::NOT_FOUND, *code, msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn error_body(err: AppError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = tokio_test::block_on(axum::body::to_bytes(resp.into_body(), usize::MAX))
            .expect("Failed to read response body");
        (status, serde_json::from_slice(&bytes).expect("Failed to parse error body"))
    }

    #[test]
    fn not_found_reports_the_entity_code() {
        let (status, body) =
            error_body(AppError::NotFound(ErrorCode::NoSuchUser, "User 42 not found".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 4);
        assert_eq!(body["error"], "NoSuchUser");

        let (_, body) = error_body(AppError::NotFound(
            ErrorCode::NoSuchCheck,
            "Inspection 7 not found".to_string(),
        ));
        assert_eq!(body["code"], 6);
        assert_eq!(body["error"], "NoSuchCheck");

        let (_, body) =
            error_body(AppError::NotFound(ErrorCode::NoSuchEpi, "EPI 3 not found".to_string()));
        assert_eq!(body["code"], 5);
    }

    #[test]
    fn validation_maps_to_bad_value() {
        let (status, body) = error_body(AppError::Validation("periodicity".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 8);
    }
}
