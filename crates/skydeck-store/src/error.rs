//! Store-specific error types.

use thiserror::Error;

use skydeck_core::{AppError, RusqliteErrorExt, StorageError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to create data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Classify for the application-wide error hierarchy.
    pub fn into_storage_error(self) -> StorageError {
        match self {
            StoreError::Database(e) => e.into_storage_error(),
            StoreError::Io(e) => StorageError::Unavailable(e.to_string()),
            e @ StoreError::Encode { .. } => StorageError::WriteFailed(e.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Storage(e.into_storage_error())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
