//! Error types for the sync engine.

use crate::transport::is_transient_status;
use congelator_model::CodecError;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Coarse classification of a [`SyncError`], one per distinct remedy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, 5xx or 429 that outlived the retry budget.
    Transient,
    /// The target document does not exist; reconfigure the session.
    NotFound,
    /// The credential was rejected for writing; rotate it.
    AuthFailed,
    /// The remote bytes are not a usable document.
    MalformedDocument,
    /// Anything else.
    Generic,
}

/// Errors that can occur during sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network or transport error.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// The remote document does not exist.
    #[error("remote document not found")]
    NotFound,

    /// The credential was rejected.
    #[error("credential invalid for write: {0}")]
    AuthFailed(String),

    /// The remote document could not be decoded.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The creation request was refused.
    #[error("document creation failed (status {status})")]
    CreationFailed {
        /// HTTP status code.
        status: u16,
    },

    /// Reading the document failed.
    #[error("fetch failed (status {status})")]
    FetchFailed {
        /// HTTP status code.
        status: u16,
    },

    /// Writing the document failed.
    #[error("replace failed (status {status})")]
    ReplaceFailed {
        /// HTTP status code.
        status: u16,
    },

    /// The existence probe failed.
    #[error("connection check failed (status {status})")]
    ConnectionFailed {
        /// HTTP status code.
        status: u16,
    },

    /// The service answered with a body we cannot interpret.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// The configured document is gone; the session was cleared.
    #[error("session configuration is invalid; set up sync again")]
    ConfigInvalid,

    /// No session configuration is set.
    #[error("no session configuration")]
    NotConfigured,

    /// The remote document has not been loaded yet.
    #[error("document not loaded yet; refresh before making changes")]
    NotHydrated,

    /// No item with the given id.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// Rejected caller input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Persisting or loading the session configuration failed.
    #[error("config store error: {0}")]
    ConfigStore(String),
}

impl SyncError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if this error can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SyncError::Transport { retryable: true, .. })
    }

    /// Classifies the error by remedy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Transport { .. } => ErrorKind::Transient,
            SyncError::NotFound | SyncError::ConfigInvalid => ErrorKind::NotFound,
            SyncError::AuthFailed(_) => ErrorKind::AuthFailed,
            SyncError::MalformedDocument(_) => ErrorKind::MalformedDocument,
            SyncError::CreationFailed { status }
            | SyncError::FetchFailed { status }
            | SyncError::ReplaceFailed { status }
            | SyncError::ConnectionFailed { status }
                if is_transient_status(*status) =>
            {
                ErrorKind::Transient
            }
            _ => ErrorKind::Generic,
        }
    }
}

impl From<CodecError> for SyncError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::UnexpectedCreateResponse { message } => {
                SyncError::UnexpectedResponse(message)
            }
            other => SyncError::MalformedDocument(other.to_string()),
        }
    }
}
