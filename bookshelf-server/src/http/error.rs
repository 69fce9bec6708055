//! API error types with IntoResponse
//!
//! Every failure a handler can hit is classified here. Bodies are always
//! `{"error": "..."}`; causes of internal errors are logged, not returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Store not connected (503)
    Unavailable,

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Path id is not a valid identity (400)
    InvalidId { id: String },

    /// Any other store failure (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service unavailable".to_string(),
            ),
            Self::NotFound { resource } => {
                (StatusCode::NOT_FOUND, format!("{} not found", resource))
            }
            Self::InvalidId { id } => {
                tracing::debug!(id = %id, "Rejected malformed id");
                (StatusCode::BAD_REQUEST, "Invalid id".to_string())
            }
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::InvalidId(id) => Self::InvalidId { id },
            e if e.is_connection() => {
                tracing::warn!("Store became unreachable mid-request: {}", e);
                Self::Unavailable
            }
            e => Self::Database(e),
        }
    }
}
