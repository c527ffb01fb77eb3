//! Directory client error types.

use std::sync::Arc;

/// Errors from the informer directory client.
///
/// These never leave [`super::DirectoryClient::fetch_informers`]; they are
/// logged there and collapse into an empty informer list.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DirectoryError {
    /// No API key stored or supplied.
    #[error("missing API key")]
    MissingApiKey,

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Any status other than 200.
    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },

    /// Body is not JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON is neither `{"informers": [...]}` nor a bare array.
    #[error("unrecognized response shape")]
    UnrecognizedShape,
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { DirectoryError::Timeout } else { DirectoryError::Network(Arc::new(err)) }
    }
}
