//! Client error types

use thiserror::Error;
use vitrina_core::{StoreError, UploadError};

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Serialization(e) => StoreError::Malformed(e.to_string()),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<ClientError> for UploadError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => UploadError::Transport(e.to_string()),
            ClientError::Serialization(_) => UploadError::MissingUrl,
            other => UploadError::Rejected(other.to_string()),
        }
    }
}
