//! Workflow error types.
//!
//! Authorization and validation failures are decided entirely locally and
//! never reach the record store. Store failures are caught at the call site
//! that issued them and surfaced as [`BoardError::StoreUnavailable`]; they
//! never escape as unhandled faults.

use askboard_dialog::DialogError;
use thiserror::Error;

use crate::store::StoreError;

/// Alias for `Result<T, BoardError>`.
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors surfaced by the inquiry workflow.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A required field was missing or empty at creation. Raised before
    /// any store call; local state is untouched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The password did not unlock a secret record (opening it, or
    /// deleting it without operator capability). Cancelling the password
    /// prompt counts as a mismatch.
    #[error("access denied: password mismatch")]
    AccessDenied,

    /// A reply mutation was attempted without operator capability.
    /// Distinguished from [`BoardError::AccessDenied`] for testability;
    /// user-facing messaging may treat them alike.
    #[error("operator capability required")]
    NotAuthorized,

    /// The referenced inquiry is not in the current list.
    #[error("inquiry not found: {id}")]
    NotFound { id: String },

    /// The record store call failed. The prior in-memory state is kept;
    /// nothing is rolled back beyond not applying the failed mutation.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// The dialog service refused or lost a request.
    #[error("dialog failed: {0}")]
    Dialog(#[from] DialogError),
}
