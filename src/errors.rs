// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and the message
/// code the mobile client switches on (the `message` field of the body)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Place type must be 'kakao' or 'tour'")]
    InvalidType,

    #[error("Invalid place type: {0}")]
    InvalidPlaceType(String),

    #[error("Place type is required")]
    MissingPlaceType,

    #[error("Missing or invalid field: {0}")]
    InvalidKey(String),

    #[error("Review not found for this user")]
    InvalidReview,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing or invalid access token")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upload exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Inference error: {0}")]
    InferenceError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error")]
    InternalError,
}

impl AppError {
    /// Message code returned to clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidType => "INVALID_TYPE",
            AppError::InvalidPlaceType(_) => "INVALID_PLACE_TYPE",
            AppError::MissingPlaceType => "PLACE_TYPE_ERROR",
            AppError::InvalidKey(_) => "INVALID_KEY",
            AppError::InvalidReview => "INVALID_REVIEW",
            AppError::InvalidImage(_) => "INVALID_IMAGE",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized => "INVALID_TOKEN",
            AppError::Forbidden => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InferenceError(_) => "INFERENCE_ERROR",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// Convert AppError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "message": self.code(),
            "detail": self.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidType
            | AppError::InvalidPlaceType(_)
            | AppError::MissingPlaceType
            | AppError::InvalidKey(_)
            | AppError::InvalidReview
            | AppError::InvalidImage(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::DatabaseError(_)
            | AppError::InferenceError(_)
            | AppError::StorageError(_)
            | AppError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}
