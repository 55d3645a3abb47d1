//! # HTTP Surface
//!
//! Router, shared state, and the resource handlers. Handlers never decide
//! status codes or catch failures; they return `ApiResult` and the error
//! type renders the response centrally.

pub mod bootcamps;
pub mod courses;
pub mod response;
pub mod server;

pub use response::{ItemBody, ListBody};
pub use server::{router, AppState};

use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Parse a request body, keeping malformed JSON inside the standard error
/// envelope
pub(crate) fn parse_json(bytes: &[u8]) -> ApiResult<Value> {
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}
