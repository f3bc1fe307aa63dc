//! Inquiry persistence.
//!
//! SQLite-backed CRUD for inquiry records, implementing the core's
//! `RecordStore` collaborator contract. The store assigns `id` (UUID v7)
//! and `created_at` (unix seconds) at insertion; list order is
//! `created_at` descending with ties broken by `id` descending, which for
//! time-ordered UUIDs matches insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};
use uuid::Uuid;

use askboard_core::{Inquiry, InquiryDraft, InquiryStatus, RecordStore, ReplyUpdate};

use crate::db::Database;
use crate::error::{StoreError, StoreResult};

const SELECT_COLUMNS: &str =
    "id, title, content, author, password, is_secret, status, reply, created_at";

/// CRUD operations on inquiry records.
#[derive(Clone)]
pub struct InquiryStore {
    db: Database,
}

impl InquiryStore {
    /// Create a new inquiry store backed by `db`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All inquiries, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> StoreResult<Vec<Inquiry>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM inquiries \
                     ORDER BY created_at DESC, id DESC"
                ))?;
                let rows = stmt
                    .query_map([], map_inquiry_row)?
                    .collect::<Result<Vec<_>, _>>()?;

                rows.into_iter().map(|r| r.into_inquiry()).collect()
            })
            .await
    }

    /// Insert a new inquiry and return the stored record.
    ///
    /// The record starts `pending` with no reply; `id` and `created_at`
    /// are assigned here, not by the caller.
    #[instrument(skip(self, draft))]
    pub async fn create(&self, draft: InquiryDraft) -> StoreResult<Inquiry> {
        let now = Utc::now().timestamp();
        let inquiry = Inquiry {
            id: Uuid::now_v7().to_string(),
            title: draft.title,
            content: draft.content,
            author: draft.author,
            password: draft.password,
            is_secret: draft.is_secret,
            created_at: DateTime::from_timestamp(now, 0).unwrap_or_default(),
            status: InquiryStatus::Pending,
            reply: None,
        };

        let row = inquiry.clone();
        self.db
            .execute(move |conn| {
                conn.execute(
                    "INSERT INTO inquiries (id, title, content, author, password, is_secret, status, reply, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    rusqlite::params![
                        row.id,
                        row.title,
                        row.content,
                        row.author,
                        row.password,
                        row.is_secret,
                        row.status.as_str(),
                        row.reply,
                        now
                    ],
                )?;
                Ok(())
            })
            .await?;

        debug!(inquiry_id = %inquiry.id, secret = inquiry.is_secret, "inquiry created");
        Ok(inquiry)
    }

    /// Write an atomic reply/status update to one record.
    ///
    /// Both columns move together; the schema's CHECK constraint rejects
    /// any write that would let them disagree.
    #[instrument(skip(self, update))]
    pub async fn update_reply(&self, id: &str, update: &ReplyUpdate) -> StoreResult<()> {
        let row_id = id.to_string();
        let reply = update.reply().map(str::to_string);
        let status = update.status().as_str();

        self.db
            .execute(move |conn| {
                let updated = conn.execute(
                    "UPDATE inquiries SET reply = ?2, status = ?3 WHERE id = ?1",
                    rusqlite::params![row_id, reply, status],
                )?;
                if updated == 0 {
                    return Err(StoreError::NotFound { id: row_id });
                }
                Ok(())
            })
            .await?;

        debug!(inquiry_id = %id, status, "reply updated");
        Ok(())
    }

    /// Remove an inquiry permanently.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let id = id.to_string();
        self.db
            .execute(move |conn| {
                let deleted = conn.execute(
                    "DELETE FROM inquiries WHERE id = ?1",
                    rusqlite::params![id],
                )?;
                if deleted == 0 {
                    return Err(StoreError::NotFound { id });
                }
                Ok(())
            })
            .await
    }

    /// Return the total number of inquiries.
    #[instrument(skip(self))]
    pub async fn count(&self) -> StoreResult<i64> {
        self.db
            .execute(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM inquiries", [], |row| row.get(0))?;
                Ok(count)
            })
            .await
    }
}

#[async_trait]
impl RecordStore for InquiryStore {
    async fn list_inquiries(&self) -> Result<Vec<Inquiry>, askboard_core::StoreError> {
        self.list().await.map_err(Into::into)
    }

    async fn insert_inquiry(
        &self,
        draft: InquiryDraft,
    ) -> Result<Inquiry, askboard_core::StoreError> {
        self.create(draft).await.map_err(Into::into)
    }

    async fn update_reply(
        &self,
        id: &str,
        update: ReplyUpdate,
    ) -> Result<(), askboard_core::StoreError> {
        InquiryStore::update_reply(self, id, &update)
            .await
            .map_err(Into::into)
    }

    async fn delete_inquiry(&self, id: &str) -> Result<(), askboard_core::StoreError> {
        self.delete(id).await.map_err(Into::into)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Internal row mapping
// ═══════════════════════════════════════════════════════════════════════

/// Raw row data from SQLite before status parsing.
struct InquiryRow {
    id: String,
    title: String,
    content: String,
    author: String,
    password: String,
    is_secret: bool,
    status: String,
    reply: Option<String>,
    created_at: i64,
}

fn map_inquiry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<InquiryRow> {
    Ok(InquiryRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        author: row.get(3)?,
        password: row.get(4)?,
        is_secret: row.get(5)?,
        status: row.get(6)?,
        reply: row.get(7)?,
        created_at: row.get(8)?,
    })
}

impl InquiryRow {
    fn into_inquiry(self) -> StoreResult<Inquiry> {
        let status = InquiryStatus::parse(&self.status).ok_or_else(|| {
            StoreError::InvalidArgument(format!("unknown inquiry status: {}", self.status))
        })?;
        Ok(Inquiry {
            id: self.id,
            title: self.title,
            content: self.content,
            author: self.author,
            password: self.password,
            is_secret: self.is_secret,
            created_at: DateTime::from_timestamp(self.created_at, 0).unwrap_or_default(),
            status,
            reply: self.reply,
        })
    }
}

// ── tests ────────────────────────────────────────────────────────────
