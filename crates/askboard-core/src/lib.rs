//! # askboard-core
//!
//! Inquiry access-control and lifecycle workflow for Askboard.
//!
//! Visitors post support inquiries, optionally marked secret and gated by a
//! shared password; an operator answers them. This crate owns everything
//! with real state-machine and authorization logic:
//!
//! - **[`inquiry`]** -- the `Inquiry` entity, its `pending`/`answered`
//!   lifecycle, compose-form drafts, and the atomic reply/status update.
//! - **[`store`]** -- the `RecordStore` trait the engine drives; the
//!   persistence backend is an external collaborator behind it.
//! - **[`secret`]** -- the `SecretVerifier` seam for password checks
//!   (plaintext equality today, swappable without touching call sites).
//! - **[`board`]** -- the `InquiryBoard` workflow engine: refresh, compose,
//!   open, reply, clear-reply, delete, with capability checks decided
//!   before any store call and blocking questions routed through
//!   [`askboard_dialog::DialogService`].
//! - **[`error`]** -- the `BoardError` taxonomy via [`thiserror`].
//!
//! Lifecycle per inquiry:
//!
//! ```text
//! [pending] --reply(text)--> [answered]
//! [answered] --clear_reply--> [pending]
//! [pending|answered] --delete--> (removed)
//! ```

pub mod board;
pub mod error;
pub mod inquiry;
pub mod secret;
pub mod store;

// Re-export the most commonly used types at the crate root for convenience.
pub use board::{Capability, InquiryBoard};
pub use error::{BoardError, BoardResult};
pub use inquiry::{Inquiry, InquiryDraft, InquiryEntry, InquiryStatus, ReplyUpdate};
pub use secret::{PlaintextVerifier, SecretVerifier};
pub use store::{RecordStore, StoreError, StoreResult};
