//! Structured errors for the informers server.
//!
//! Each variant maps to one HTTP status and a stable error code in the JSON
//! body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured errors for the informers server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request parameters (e.g., empty API key).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The directory rejected the submitted API key.
    #[error("INVALID_KEY: {0}")]
    InvalidKey(String),

    /// Missing or wrong credentials for the endpoint's tier.
    #[error("FORBIDDEN: {0}")]
    Forbidden(String),

    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// The remote directory returned nothing usable.
    #[error("UPSTREAM_FAILED: {0}")]
    Upstream(String),

    #[error("INTERNAL: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::InvalidKey(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::InvalidKey(_) => "INVALID_KEY",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Upstream(_) => "UPSTREAM_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::InvalidInput(msg)
            | Self::InvalidKey(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Upstream(msg)
            | Self::Internal(msg) => msg.clone(),
        }
    }
}

impl From<informers_core::Error> for ApiError {
    fn from(err: informers_core::Error) -> Self {
        use informers_core::Error;

        match err {
            Error::InvalidInput(msg) => Self::InvalidInput(msg),
            Error::RefreshFailed => Self::Upstream("directory returned no informers".into()),
            other => {
                tracing::warn!("internal error: {other}");
                Self::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { code: self.code(), message: self.message() };
        (self.status(), Json(body)).into_response()
    }
}
