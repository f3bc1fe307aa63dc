//! Error types for the askboard-store crate.
//!
//! All storage operations return [`StoreError`] via [`StoreResult`]. At
//! the `RecordStore` trait boundary these convert into the core's opaque
//! store failure, which is all the workflow engine ever sees.

use thiserror::Error;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the SQLite record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite operation failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A schema migration failed.
    #[error("migration v{version} failed: {message}")]
    Migration { version: u32, message: String },

    /// The requested inquiry was not found.
    #[error("inquiry not found: {id}")]
    NotFound { id: String },

    /// An invalid argument was provided to a store operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A blocking task was cancelled or panicked.
    #[error("background task failed: {0}")]
    TaskJoin(String),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}

impl From<StoreError> for askboard_core::StoreError {
    fn from(err: StoreError) -> Self {
        askboard_core::StoreError::new(err)
    }
}
