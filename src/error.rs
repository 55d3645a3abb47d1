//! # API Errors
//!
//! The single place where failures become HTTP responses. Handlers return
//! `ApiResult<T>` and never decide a status code inline; the status is bound
//! into the error value at the point of failure detection and rendered here
//! exactly once. The original error is logged server-side before the
//! response is sent, and unclassified failures collapse to a generic 500 so
//! internals never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::logger::Logger;

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Document not found or identifier malformed
    #[error("{resource} not found with id of {id}")]
    NotFound { resource: &'static str, id: String },

    /// Schema validation failed; one message per violated field
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// Duplicate value for a unique field
    #[error("Duplicate field value entered for '{0}'")]
    Duplicate(&'static str),

    /// Malformed request (bad body, missing file, bad file type/size)
    #[error("{0}")]
    BadRequest(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Geocoding provider failure
    #[error("Geocoding service error: {0}")]
    Geocode(String),

    /// Disk write/read failure
    #[error("I/O error: {0}")]
    Io(String),

    /// Unclassified failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Construct a not-found error naming the missing resource and id
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Construct a bad-request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 404 Not Found (malformed ids included)
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,

            // 400 Bad Request
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // Upstream failure
            ApiError::Geocode(_) => StatusCode::BAD_GATEWAY,

            // 500 Internal Server Error
            ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the client. Server-side detail for 500s is
    /// replaced with a generic message.
    fn client_message(&self) -> String {
        match self {
            ApiError::Io(_) | ApiError::Internal(_) => "Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log the original (unredacted) error before responding
        Logger::error(
            "request_failed",
            &[
                ("error", &self.to_string()),
                ("status", status.as_str()),
            ],
        );

        let body = Json(ErrorBody {
            success: false,
            error: self.client_message(),
        });
        (status, body).into_response()
    }
}
