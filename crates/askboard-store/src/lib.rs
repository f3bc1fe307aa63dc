//! # askboard-store
//!
//! SQLite-backed record store for Askboard inquiries.
//!
//! Implements the `RecordStore` collaborator from `askboard-core`:
//! ordered list, insert, reply update and delete over a single
//! `inquiries` table. The workflow engine treats this crate as a remote,
//! fallible service; everything SQLite-specific stays behind the trait.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  InquiryStore (RecordStore impl)         │
//! ├──────────────────────────────────────────┤
//! │  Database (rusqlite WAL + mmap)          │
//! │  Migrations (versioned, transactional)   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Quick start
//!
//! ```ignore
//! use askboard_store::{Database, InquiryStore};
//!
//! let db = Database::open_and_migrate("data/askboard.db").await?;
//! let store = InquiryStore::new(db);
//! let inquiries = store.list().await?;
//! ```

pub mod db;
pub mod error;
pub mod inquiry_store;
pub mod migration;

// ── re-exports ───────────────────────────────────────────────────────

pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use inquiry_store::InquiryStore;
