//! Error types and response handling for the HTTP API.
//!
//! Provides error classification, HTTP status code mapping, and JSON error
//! response generation. The HTML form never goes through here; it renders
//! validation messages inline.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use thiserror::Error;

use crate::calc::ValidationError;

/// Errors that can occur while serving an API request.
#[derive(Debug, Error)]
pub enum AppError {
    /// User input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body could not be decoded as JSON or form data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Writing the CSV export failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP error from response building
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<axum::http::Error> for AppError {
    fn from(err: axum::http::Error) -> Self {
        AppError::Http(err.to_string())
    }
}

impl AppError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Http(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Csv(_) => "export_error",
            AppError::Http(_) => "http_error",
        }
    }
}

/// Builder for standardized error responses
pub struct ErrorResponse;

impl ErrorResponse {
    /// Create a JSON error response from an AppError
    pub fn from_error(err: &AppError, request_id: &str) -> Response {
        let mut body = serde_json::json!({
            "error": {
                "type": err.error_type(),
                "message": err.to_string(),
                "request_id": request_id
            }
        });
        if let AppError::Validation(validation) = err {
            if let Some(field) = validation.field() {
                body["error"]["field"] = serde_json::Value::from(field);
            }
        }

        let mut response = Response::new(Body::from(body.to_string()));
        *response.status_mut() = err.status_code();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        response
    }
}
