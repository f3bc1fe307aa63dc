//! The inquiry entity and its lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};

/// Title shown in list views for secret inquiries the viewer has not
/// unlocked.
pub const SECRET_TITLE_PLACEHOLDER: &str = "Secret inquiry";

// ═══════════════════════════════════════════════════════════════════════
//  Status
// ═══════════════════════════════════════════════════════════════════════

/// Lifecycle state of an inquiry.
///
/// `Answered` holds exactly while a reply is present; the only write path
/// for either field is [`ReplyUpdate`], which moves both together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    /// Waiting for an operator answer.
    Pending,
    /// An operator reply is attached.
    Answered,
}

impl InquiryStatus {
    /// Convert to the string stored in the record store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Answered => "answered",
        }
    }

    /// Parse from the string stored in the record store.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "answered" => Some(Self::Answered),
            _ => None,
        }
    }
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Inquiry
// ═══════════════════════════════════════════════════════════════════════

/// A persisted support inquiry.
///
/// `title`, `content`, `author`, `password` and `is_secret` are fixed at
/// creation; only `reply`/`status` change afterwards, and only together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inquiry {
    /// Store-assigned unique identifier.
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    /// Plaintext shared secret, possibly empty. Compared byte-for-byte,
    /// never hashed.
    pub password: String,
    /// Whether reading the inquiry is password-gated.
    pub is_secret: bool,
    /// Store-assigned insertion time; the sole list sort key (descending).
    pub created_at: DateTime<Utc>,
    pub status: InquiryStatus,
    pub reply: Option<String>,
}

impl Inquiry {
    /// Whether an operator reply is attached.
    pub fn is_answered(&self) -> bool {
        self.status == InquiryStatus::Answered
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Draft
// ═══════════════════════════════════════════════════════════════════════

/// Compose-form input for a new inquiry.
#[derive(Debug, Clone, Default)]
pub struct InquiryDraft {
    pub title: String,
    pub content: String,
    pub author: String,
    pub password: String,
    pub is_secret: bool,
}

impl InquiryDraft {
    /// Check required fields. Runs before any store call.
    ///
    /// `title`, `content` and `author` must be non-empty; a secret draft
    /// must also carry a non-empty password. Non-secret drafts may leave
    /// the password empty, in which case deletion is not password-gated.
    pub fn validate(&self) -> BoardResult<()> {
        if self.title.trim().is_empty() {
            return Err(BoardError::Validation("title must not be empty".into()));
        }
        if self.content.trim().is_empty() {
            return Err(BoardError::Validation("content must not be empty".into()));
        }
        if self.author.trim().is_empty() {
            return Err(BoardError::Validation("author must not be empty".into()));
        }
        if self.is_secret && self.password.is_empty() {
            return Err(BoardError::Validation(
                "secret inquiries require a password".into(),
            ));
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  Reply update
// ═══════════════════════════════════════════════════════════════════════

/// An atomic write to an inquiry's `reply`/`status` pair.
///
/// The fields are private so the pair can only be built through
/// [`ReplyUpdate::answered`] or [`ReplyUpdate::cleared`] — `status ==
/// Answered iff reply is present` holds by construction on every write
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyUpdate {
    reply: Option<String>,
}

impl ReplyUpdate {
    /// Attach an operator reply; the status moves to `Answered`.
    pub fn answered(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
        }
    }

    /// Remove the reply; the status reverts to `Pending`.
    pub fn cleared() -> Self {
        Self { reply: None }
    }

    /// The reply value this update writes.
    pub fn reply(&self) -> Option<&str> {
        self.reply.as_deref()
    }

    /// The status this update writes, derived from the reply.
    pub fn status(&self) -> InquiryStatus {
        if self.reply.is_some() {
            InquiryStatus::Answered
        } else {
            InquiryStatus::Pending
        }
    }

    /// Apply this update to a local copy of the record.
    pub fn apply(&self, inquiry: &mut Inquiry) {
        inquiry.reply = self.reply.clone();
        inquiry.status = self.status();
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  List projection
// ═══════════════════════════════════════════════════════════════════════

/// One row of the list view.
///
/// Secret inquiries viewed without operator capability show a fixed
/// placeholder instead of their title; everything else a list row needs is
/// public regardless of secrecy.
#[derive(Debug, Clone, Serialize)]
pub struct InquiryEntry {
    pub id: String,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub status: InquiryStatus,
    pub is_secret: bool,
    /// Whether the title was replaced by the secret placeholder.
    pub masked: bool,
}

impl InquiryEntry {
    /// Project an inquiry into a list row, masking the title if requested.
    pub fn project(inquiry: &Inquiry, mask_secret: bool) -> Self {
        let masked = inquiry.is_secret && mask_secret;
        Self {
            id: inquiry.id.clone(),
            title: if masked {
                SECRET_TITLE_PLACEHOLDER.to_string()
            } else {
                inquiry.title.clone()
            },
            author: inquiry.author.clone(),
            created_at: inquiry.created_at,
            status: inquiry.status,
            is_secret: inquiry.is_secret,
            masked,
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────
