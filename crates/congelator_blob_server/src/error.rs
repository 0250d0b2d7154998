//! Error types for the blob service.

use thiserror::Error;

/// Result type for blob service operations.
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors answered by the blob service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlobError {
    /// Malformed request or body.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or unknown API key.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The key does not own the document.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Unknown document or route.
    #[error("not found: {0}")]
    NotFound(String),

    /// Method not supported on the route.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// A failure scheduled with `fail_next`.
    #[error("injected fault (status {0})")]
    InjectedFault(u16),
}

impl BlobError {
    /// HTTP status for this error.
    pub fn status(&self) -> u16 {
        match self {
            BlobError::InvalidRequest(_) => 400,
            BlobError::Unauthorized(_) => 401,
            BlobError::Forbidden(_) => 403,
            BlobError::NotFound(_) => 404,
            BlobError::MethodNotAllowed(_) => 405,
            BlobError::InjectedFault(status) => *status,
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }

    /// Returns true if this is a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        self.status() >= 500
    }
}
