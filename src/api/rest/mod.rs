//! REST API module for HTTP endpoints
//!
//! - `GET /api/events` - List events (`?force=true` re-reads the file,
//!   `?order=stored` keeps file order instead of newest first)
//! - `POST /api/events` - Create an event
//! - `GET|PUT|DELETE /api/events/:id` - Read, update-or-create, delete
//! - `GET|PUT /api/config` - App configuration

pub mod config;
pub mod events;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::persistence::StoreError;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Total count (for list responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, total: None }
    }

    pub fn with_total(data: T, total: usize) -> Self {
        Self {
            data,
            total: Some(total),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    /// Where a corrupted file was copied to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
}

impl ApiError {
    fn with_code(message: impl Into<String>, code: &str) -> Self {
        Self {
            error: message.into(),
            code: code.to_string(),
            backup: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_code(message, "NOT_FOUND")
    }
}

impl From<&StoreError> for ApiError {
    fn from(err: &StoreError) -> Self {
        let code = match err {
            StoreError::Parse { .. } => "PARSE_ERROR",
            StoreError::Directory { .. } | StoreError::Write { .. } => "NO_PERMISSION",
            StoreError::Read { .. } => "READ_ERROR",
            StoreError::Serialization(_) | StoreError::Interrupted(_) => "INTERNAL_ERROR",
        };
        let mut api_error = Self::with_code(err.to_string(), code);
        if let StoreError::Parse {
            backup: Some(path), ..
        } = err
        {
            api_error.backup = Some(path.display().to_string());
        }
        api_error
    }
}

/// Map a store error to a JSON error response
pub fn store_error_response(err: StoreError) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError::from(&err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_error_mapping() {
        let err = StoreError::Parse {
            path: PathBuf::from("/data/events.json"),
            reason: "invalid JSON".to_string(),
            backup: Some(PathBuf::from("/data/events.json.1.bak")),
        };
        let api_error = ApiError::from(&err);
        assert_eq!(api_error.code, "PARSE_ERROR");
        assert_eq!(api_error.backup.as_deref(), Some("/data/events.json.1.bak"));
    }

    #[test]
    fn test_write_error_mapping() {
        let err = StoreError::Write {
            path: PathBuf::from("/data/events.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(ApiError::from(&err).code, "NO_PERMISSION");
    }
}
