//! Error types for item operations.

use stockpile_types::CodecError;
use thiserror::Error;

/// Errors that can occur while building, marshalling, or decoding items.
#[derive(Debug, Error)]
pub enum ItemError {
    /// An item attribute breaks a construction rule.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The identifier codec rejected its input.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A batch payload does not match the item wire schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// A stored field map lacks a required field.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A stored field holds a value of the wrong shape.
    #[error("malformed value for {field}: {reason}")]
    MalformedValue { field: &'static str, reason: String },

    /// The context was cancelled or expired before derivation completed.
    #[error("identifier derivation cancelled")]
    Cancelled,

    /// A delegated deriver failed or returned an inconsistent identifier.
    #[error("identifier derivation failed: {0}")]
    Derivation(String),
}

/// Convenience type alias for item operations.
pub type ItemResult<T> = std::result::Result<T, ItemError>;
