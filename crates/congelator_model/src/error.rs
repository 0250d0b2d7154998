//! Error types for the model crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding or encoding a remote document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The bytes are not valid JSON.
    #[error("malformed document: {message}")]
    MalformedJson {
        /// Parser error message.
        message: String,
    },

    /// An item or log record does not match the record schema.
    #[error("invalid {field} record: {message}")]
    InvalidRecord {
        /// Which sequence the record came from (`items` or `logs`).
        field: &'static str,
        /// Description of the mismatch.
        message: String,
    },

    /// Parseable JSON whose top-level shape is not a known document shape.
    #[error("unrecognized document shape: {found}")]
    UnrecognizedShape {
        /// The JSON type that was found.
        found: &'static str,
    },

    /// The creation endpoint answered with a body we cannot interpret.
    #[error("unexpected create response: {message}")]
    UnexpectedCreateResponse {
        /// Description of the response.
        message: String,
    },

    /// Failed to serialize a document.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Serializer error message.
        message: String,
    },
}

impl CodecError {
    /// Creates a malformed JSON error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJson {
            message: message.into(),
        }
    }

    /// Creates an invalid record error.
    pub fn invalid_record(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            field,
            message: message.into(),
        }
    }

    /// Creates an unexpected create response error.
    pub fn unexpected_create_response(message: impl Into<String>) -> Self {
        Self::UnexpectedCreateResponse {
            message: message.into(),
        }
    }

    /// Creates an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }
}
