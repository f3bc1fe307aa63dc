//! Dialog service error types.

use thiserror::Error;

/// Errors surfaced by the [`DialogService`](crate::DialogService).
///
/// User cancellation is never an error — it resolves as `false` or `None`
/// through the normal answer path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialogError {
    /// A request was issued while another one is still unresolved.
    ///
    /// The single-slot contract requires callers to serialize dialog use;
    /// this error makes a violation visible instead of silently dropping
    /// either request.
    #[error("a dialog is already pending")]
    SlotBusy,

    /// `accept` or `cancel` was called with no active dialog.
    #[error("no dialog is active")]
    NoActiveDialog,

    /// The pending request can no longer be resolved (the resolving side
    /// went away without answering).
    #[error("dialog abandoned before resolution")]
    Abandoned,
}
