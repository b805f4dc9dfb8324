use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stockpile_item::ItemError;
use stockpile_store::StoreError;
use thiserror::Error;

use crate::response::Envelope;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("item not found: {0}")]
    NotFound(String),

    #[error("item already exists: {0}")]
    AlreadyExists(String),

    /// The request body did not yield valid items.
    #[error("invalid items: {0}")]
    InvalidItems(ItemError),

    /// A stored record could not be turned back into an item.
    #[error("corrupt record {key}: {source}")]
    CorruptRecord { key: String, source: ItemError },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    /// HTTP status reported for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::Store(StoreError::KeyExists(_)) => StatusCode::CONFLICT,
            Self::InvalidItems(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CorruptRecord { .. }
            | Self::Store(_)
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        Envelope::<()>::message(status, self.to_string()).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
