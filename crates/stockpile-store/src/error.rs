/// Errors from hash store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The key cannot be used to address a record.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// A conditional write found the key already taken, either in the store
    /// or earlier in the same batch.
    #[error("key already exists: {0}")]
    KeyExists(String),

    /// A lock guarding the backend was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
