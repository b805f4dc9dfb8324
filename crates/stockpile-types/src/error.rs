use thiserror::Error;

/// Errors produced by the identifier codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input cannot be turned into an identifier.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The identifier was not produced by the encoder.
    #[error("decoding error for {id:?}: {reason}")]
    Decoding { id: String, reason: String },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
