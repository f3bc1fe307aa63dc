//! Single-slot awaitable dialog service.
//!
//! Workflows frequently need to stop and ask the user something — "are you
//! sure?", "enter the password" — without blocking the rest of the program.
//! This crate models that as a [`DialogService`]: callers await one of
//! [`alert`](DialogService::alert), [`confirm`](DialogService::confirm) or
//! [`prompt`](DialogService::prompt), a frontend observes the active
//! [`DialogRequest`] through a `watch` channel, and the eventual user action
//! resolves the suspended caller through a `oneshot` continuation.
//!
//! At most one request is outstanding at a time. Issuing a second request
//! while one is pending fails with [`DialogError::SlotBusy`]; resolving a
//! request clears the slot immediately, allowing the next one.
//!
//! # Usage
//!
//! ```rust,no_run
//! # use askboard_dialog::{DialogService, DialogOptions};
//! # async fn example() -> Result<(), askboard_dialog::DialogError> {
//! let dialogs = DialogService::new();
//!
//! // Somewhere, a frontend pumps `dialogs.subscribe()` and calls
//! // `dialogs.accept(..)` / `dialogs.cancel()` when the user reacts.
//! let sure = dialogs.confirm("Delete this reply?", DialogOptions::default()).await?;
//! # let _ = sure;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod request;
pub mod service;

pub use error::DialogError;
pub use request::{DialogAnswer, DialogKind, DialogOptions, DialogRequest};
pub use service::DialogService;
