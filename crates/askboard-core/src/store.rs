//! The record-store collaborator boundary.
//!
//! The workflow engine treats persistence as a remote, fallible service:
//! ordered list, insert, update-by-id, delete-by-id, nothing else (no
//! search, no pagination, no transactions). Implementations live in their
//! own crates; `askboard-store` provides the SQLite one.

use async_trait::async_trait;
use thiserror::Error;

use crate::inquiry::{Inquiry, InquiryDraft, ReplyUpdate};

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// A failure reported by a record store.
///
/// The workflow handles every store failure the same way (keep local
/// state, surface a generic notice), so the only payload is a message
/// for the log line.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Wrap an implementation-specific failure.
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Persistence operations the workflow engine drives.
///
/// Implementations assign `id` and `created_at` on insert and keep list
/// order `created_at` descending, ties broken by insertion order.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All inquiries, newest first.
    async fn list_inquiries(&self) -> StoreResult<Vec<Inquiry>>;

    /// Insert a validated draft and return the stored record.
    async fn insert_inquiry(&self, draft: InquiryDraft) -> StoreResult<Inquiry>;

    /// Write an atomic reply/status update to one record.
    async fn update_reply(&self, id: &str, update: ReplyUpdate) -> StoreResult<()>;

    /// Remove one record permanently.
    async fn delete_inquiry(&self, id: &str) -> StoreResult<()>;
}
