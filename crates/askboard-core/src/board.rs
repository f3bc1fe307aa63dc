//! The inquiry workflow engine.
//!
//! [`InquiryBoard`] owns the in-memory view of the board (the fetched
//! list and the currently open detail) and is the only writer to it. Every
//! operation validates and authorizes locally first — unauthorized
//! attempts never reach the record store — then delegates to the
//! [`RecordStore`] collaborator and reconciles the local view.
//!
//! Mutations follow a two-phase update: an optimistic local patch for
//! responsiveness, then a best-effort full refetch for convergence with
//! the authoritative store. The refetch failing never un-does a mutation
//! that already succeeded.

use std::sync::Arc;

use askboard_dialog::{DialogOptions, DialogService};
use tracing::{debug, warn};

use crate::error::{BoardError, BoardResult};
use crate::inquiry::{Inquiry, InquiryDraft, InquiryEntry, ReplyUpdate};
use crate::secret::{PlaintextVerifier, SecretVerifier};
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// Operator capability token.
///
/// A local capability switch, not an authenticated identity: the
/// presentation layer owns the toggle and passes the current value into
/// every gated operation, so the engine never trusts ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capability {
    /// Ungated reads plus password-gated actions. The starting value.
    #[default]
    Visitor,
    /// Bypasses secret gating; exclusive rights to reply, clear-reply and
    /// password-free delete.
    Operator,
}

impl Capability {
    /// Whether this capability grants operator rights.
    pub fn is_operator(self) -> bool {
        matches!(self, Self::Operator)
    }

    /// The other mode, for a toggle control.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Visitor => Self::Operator,
            Self::Operator => Self::Visitor,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Inquiry lifecycle and access-control workflow.
///
/// Blocking questions (password entry, destructive-action confirmation)
/// are routed through the [`DialogService`]; the engine issues at most one
/// dialog per operation, so the service's single-slot contract holds as
/// long as operations themselves are serialized (`&mut self` enforces
/// that).
pub struct InquiryBoard {
    store: Arc<dyn RecordStore>,
    dialogs: DialogService,
    verifier: Box<dyn SecretVerifier>,
    /// Last successfully fetched list, newest first.
    inquiries: Vec<Inquiry>,
    /// Id of the currently open detail, if any.
    selected: Option<String>,
}

impl InquiryBoard {
    /// Create an engine with the default plaintext password check.
    pub fn new(store: Arc<dyn RecordStore>, dialogs: DialogService) -> Self {
        Self::with_verifier(store, dialogs, Box::new(PlaintextVerifier))
    }

    /// Create an engine with a custom [`SecretVerifier`].
    pub fn with_verifier(
        store: Arc<dyn RecordStore>,
        dialogs: DialogService,
        verifier: Box<dyn SecretVerifier>,
    ) -> Self {
        Self {
            store,
            dialogs,
            verifier,
            inquiries: Vec::new(),
            selected: None,
        }
    }

    // ── view state ───────────────────────────────────────────────────

    /// The fetched list, newest first.
    pub fn inquiries(&self) -> &[Inquiry] {
        &self.inquiries
    }

    /// Number of fetched inquiries.
    pub fn count(&self) -> usize {
        self.inquiries.len()
    }

    /// The currently open detail record, if its id is still in the list.
    pub fn selected(&self) -> Option<&Inquiry> {
        let id = self.selected.as_deref()?;
        self.inquiries.iter().find(|i| i.id == id)
    }

    /// Close the open detail view.
    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// List rows for rendering. Secret titles are masked unless `cap`
    /// grants operator rights.
    pub fn entries(&self, cap: Capability) -> Vec<InquiryEntry> {
        self.inquiries
            .iter()
            .map(|i| InquiryEntry::project(i, !cap.is_operator()))
            .collect()
    }

    // ── operations ───────────────────────────────────────────────────

    /// Fetch all inquiries, newest first, replacing the local list.
    ///
    /// On store failure the previous list is kept untouched and the error
    /// is returned for display.
    pub async fn refresh(&mut self) -> BoardResult<&[Inquiry]> {
        match self.store.list_inquiries().await {
            Ok(list) => {
                debug!(count = list.len(), "inquiry list refreshed");
                self.inquiries = list;
                Ok(&self.inquiries)
            }
            Err(e) => {
                warn!(error = %e, "inquiry list fetch failed, keeping previous list");
                Err(BoardError::StoreUnavailable(e))
            }
        }
    }

    /// Create a new inquiry from a compose-form draft.
    ///
    /// Validation runs before any store call. On success a list refresh is
    /// issued; the store assigns `id` and `created_at`, so the local list
    /// converges on the refetch rather than on an optimistic insert.
    pub async fn compose(&mut self, draft: InquiryDraft) -> BoardResult<Inquiry> {
        draft.validate()?;

        let inquiry = self.store.insert_inquiry(draft).await?;
        debug!(id = %inquiry.id, secret = inquiry.is_secret, "inquiry created");

        self.refresh_best_effort().await;
        Ok(inquiry)
    }

    /// Open an inquiry's detail view.
    ///
    /// A secret record viewed without operator capability requires its
    /// password through a masked prompt; a mismatch — including a
    /// cancelled prompt — fails with [`BoardError::AccessDenied`] and
    /// leaves the detail view unchanged. The returned record is complete,
    /// password included; presentation decides what to show.
    pub async fn open(&mut self, cap: Capability, id: &str) -> BoardResult<Inquiry> {
        let inquiry = self.find(id)?.clone();

        if inquiry.is_secret && !cap.is_operator() {
            let entered = self
                .dialogs
                .prompt(
                    "This inquiry is secret. Enter its password.",
                    DialogOptions::secret(),
                )
                .await?;

            let unlocked = entered
                .as_deref()
                .is_some_and(|candidate| self.verifier.verify(candidate, &inquiry));
            if !unlocked {
                debug!(id = %inquiry.id, "secret inquiry open rejected");
                return Err(BoardError::AccessDenied);
            }
        }

        self.selected = Some(inquiry.id.clone());
        Ok(inquiry)
    }

    /// Attach an operator reply; the record becomes `answered`.
    ///
    /// Operator-only, decided before any store call. The local list and
    /// open detail are patched immediately; the follow-up refresh
    /// reconciles with the store.
    pub async fn reply(
        &mut self,
        cap: Capability,
        id: &str,
        text: impl Into<String>,
    ) -> BoardResult<Inquiry> {
        if !cap.is_operator() {
            return Err(BoardError::NotAuthorized);
        }
        self.find(id)?;

        let update = ReplyUpdate::answered(text);
        self.store.update_reply(id, update.clone()).await?;
        debug!(id, "reply attached");

        let patched = self.patch_local(id, &update)?;
        self.refresh_best_effort().await;
        Ok(patched)
    }

    /// Remove the operator reply; the record reverts to `pending`.
    ///
    /// Operator-only. Asks for confirmation first; declining returns
    /// `Ok(None)` with no store call and no error.
    pub async fn clear_reply(&mut self, cap: Capability, id: &str) -> BoardResult<Option<Inquiry>> {
        if !cap.is_operator() {
            return Err(BoardError::NotAuthorized);
        }
        self.find(id)?;

        let confirmed = self
            .dialogs
            .confirm("Really delete this reply?", DialogOptions::default())
            .await?;
        if !confirmed {
            debug!(id, "reply clearing cancelled");
            return Ok(None);
        }

        let update = ReplyUpdate::cleared();
        self.store.update_reply(id, update.clone()).await?;
        debug!(id, "reply cleared");

        let patched = self.patch_local(id, &update)?;
        self.refresh_best_effort().await;
        Ok(Some(patched))
    }

    /// Delete an inquiry permanently. Returns `Ok(false)` if the operator
    /// declined the confirmation.
    ///
    /// Operators confirm; visitors must reproduce the record's password
    /// when it carries one (records created without a password delete
    /// without a prompt). On success the record leaves the local list and
    /// any detail view referencing it is closed.
    pub async fn delete(&mut self, cap: Capability, id: &str) -> BoardResult<bool> {
        let inquiry = self.find(id)?.clone();

        if cap.is_operator() {
            let confirmed = self
                .dialogs
                .confirm(
                    "Delete this inquiry with operator privileges?",
                    DialogOptions::default(),
                )
                .await?;
            if !confirmed {
                debug!(id, "operator delete cancelled");
                return Ok(false);
            }
        } else if !inquiry.password.is_empty() {
            let entered = self
                .dialogs
                .prompt(
                    "Enter the password to delete this inquiry.",
                    DialogOptions::secret(),
                )
                .await?;

            let unlocked = entered
                .as_deref()
                .is_some_and(|candidate| self.verifier.verify(candidate, &inquiry));
            if !unlocked {
                debug!(id = %inquiry.id, "delete rejected, password mismatch");
                return Err(BoardError::AccessDenied);
            }
        }

        self.store.delete_inquiry(id).await?;
        debug!(id, "inquiry deleted");

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.inquiries.retain(|i| i.id != id);
        self.refresh_best_effort().await;
        Ok(true)
    }

    // ── internals ────────────────────────────────────────────────────

    fn find(&self, id: &str) -> BoardResult<&Inquiry> {
        self.inquiries
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| BoardError::NotFound { id: id.to_string() })
    }

    /// Apply `update` to the local copy of `id` and return the result.
    fn patch_local(&mut self, id: &str, update: &ReplyUpdate) -> BoardResult<Inquiry> {
        let record = self
            .inquiries
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BoardError::NotFound { id: id.to_string() })?;
        update.apply(record);
        Ok(record.clone())
    }

    /// Post-mutation refetch. The mutation already succeeded, so a failure
    /// here only delays convergence; `refresh` logs it.
    async fn refresh_best_effort(&mut self) {
        let _ = self.refresh().await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use tokio::task::JoinHandle;

    use super::*;
    use crate::inquiry::{InquiryStatus, SECRET_TITLE_PLACEHOLDER};
    use crate::store::{StoreError, StoreResult};

    // ── fixtures ─────────────────────────────────────────────────────

    /// In-memory store that counts calls and can be switched to fail.
    struct TestStore {
        records: Mutex<Vec<Inquiry>>,
        seq: AtomicUsize,
        fail_lists: AtomicBool,
        fail_mutations: AtomicBool,
        lists: AtomicUsize,
        inserts: AtomicUsize,
        updates: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl TestStore {
        fn with_records(records: Vec<Inquiry>) -> Self {
            Self {
                records: Mutex::new(records),
                seq: AtomicUsize::new(0),
                fail_lists: AtomicBool::new(false),
                fail_mutations: AtomicBool::new(false),
                lists: AtomicUsize::new(0),
                inserts: AtomicUsize::new(0),
                updates: AtomicUsize::new(0),
                deletes: AtomicUsize::new(0),
            }
        }

        fn snapshot(&self, id: &str) -> Inquiry {
            self.records
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == id)
                .expect("record should exist")
                .clone()
        }

        fn assert_invariant(&self) {
            for record in self.records.lock().unwrap().iter() {
                assert_eq!(
                    record.status == InquiryStatus::Answered,
                    record.reply.is_some(),
                    "status/reply disagree on {}",
                    record.id
                );
            }
        }
    }

    #[async_trait]
    impl RecordStore for TestStore {
        async fn list_inquiries(&self) -> StoreResult<Vec<Inquiry>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            if self.fail_lists.load(Ordering::SeqCst) {
                return Err(StoreError::new("store offline"));
            }
            let mut list = self.records.lock().unwrap().clone();
            list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(list)
        }

        async fn insert_inquiry(&self, draft: InquiryDraft) -> StoreResult<Inquiry> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(StoreError::new("store offline"));
            }
            let n = self.seq.fetch_add(1, Ordering::SeqCst);
            let inquiry = Inquiry {
                id: format!("new-{n}"),
                title: draft.title,
                content: draft.content,
                author: draft.author,
                password: draft.password,
                is_secret: draft.is_secret,
                created_at: Utc::now() + Duration::seconds(60 + n as i64),
                status: InquiryStatus::Pending,
                reply: None,
            };
            self.records.lock().unwrap().push(inquiry.clone());
            Ok(inquiry)
        }

        async fn update_reply(&self, id: &str, update: ReplyUpdate) -> StoreResult<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(StoreError::new("store offline"));
            }
            let mut records = self.records.lock().unwrap();
            let record = records
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| StoreError::new(format!("no such inquiry: {id}")))?;
            update.apply(record);
            Ok(())
        }

        async fn delete_inquiry(&self, id: &str) -> StoreResult<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(StoreError::new("store offline"));
            }
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|i| i.id != id);
            if records.len() == before {
                return Err(StoreError::new(format!("no such inquiry: {id}")));
            }
            Ok(())
        }
    }

    fn record(id: &str, offset_secs: i64, is_secret: bool, password: &str) -> Inquiry {
        Inquiry {
            id: id.into(),
            title: format!("title {id}"),
            content: format!("content {id}"),
            author: "mina".into(),
            password: password.into(),
            is_secret,
            created_at: Utc::now() + Duration::seconds(offset_secs),
            status: InquiryStatus::Pending,
            reply: None,
        }
    }

    fn draft(is_secret: bool, password: &str) -> InquiryDraft {
        InquiryDraft {
            title: "Crash on start".into(),
            content: "The app exits immediately.".into(),
            author: "jun".into(),
            password: password.into(),
            is_secret,
        }
    }

    async fn board_with(
        records: Vec<Inquiry>,
    ) -> (InquiryBoard, Arc<TestStore>, DialogService) {
        let store = Arc::new(TestStore::with_records(records));
        let dialogs = DialogService::new();
        let mut board = InquiryBoard::new(store.clone(), dialogs.clone());
        board.refresh().await.unwrap();
        store.lists.store(0, Ordering::SeqCst);
        (board, store, dialogs)
    }

    /// How a scripted frontend answers the next dialog.
    enum Respond {
        Accept(Option<&'static str>),
        Cancel,
    }

    /// Answer the next dialog request on a background task and hand back
    /// the request that was shown.
    fn answer_next(
        dialogs: DialogService,
        respond: Respond,
    ) -> JoinHandle<askboard_dialog::DialogRequest> {
        tokio::spawn(async move {
            let mut rx = dialogs.subscribe();
            let request = loop {
                if let Some(r) = rx.borrow().clone() {
                    break r;
                }
                rx.changed().await.expect("dialog service dropped");
            };
            match respond {
                Respond::Accept(input) => {
                    dialogs.accept(input.map(str::to_string)).await.unwrap()
                }
                Respond::Cancel => dialogs.cancel().await.unwrap(),
            }
            request
        })
    }

    // ── refresh ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn refresh_orders_newest_first() {
        let (board, _store, _dialogs) = board_with(vec![
            record("old", 0, false, ""),
            record("new", 10, false, ""),
            record("mid", 5, false, ""),
        ])
        .await;

        let ids: Vec<&str> = board.inquiries().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["new", "mid", "old"]);
        assert_eq!(board.count(), 3);
    }

    #[tokio::test]
    async fn refresh_failure_keeps_previous_list() {
        let (mut board, store, _dialogs) =
            board_with(vec![record("a", 0, false, "")]).await;

        store.fail_lists.store(true, Ordering::SeqCst);
        let err = board.refresh().await.unwrap_err();
        assert!(matches!(err, BoardError::StoreUnavailable(_)));

        // The stale list is better than an empty one.
        assert_eq!(board.count(), 1);
        assert_eq!(board.inquiries()[0].id, "a");
    }

    // ── compose ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn compose_rejects_blank_fields_before_any_store_call() {
        let (mut board, store, _dialogs) = board_with(vec![]).await;

        let mut bad = draft(false, "");
        bad.title = "   ".into();
        let err = board.compose(bad).await.unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
        assert_eq!(store.lists.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn compose_rejects_secret_draft_without_password() {
        let (mut board, store, _dialogs) = board_with(vec![]).await;

        let err = board.compose(draft(true, "")).await.unwrap_err();
        assert!(matches!(err, BoardError::Validation(_)));
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn compose_inserts_pending_and_refreshes_to_head() {
        let (mut board, store, _dialogs) =
            board_with(vec![record("existing", 0, false, "")]).await;

        let created = board.compose(draft(false, "pw")).await.unwrap();
        assert_eq!(created.status, InquiryStatus::Pending);
        assert_eq!(created.reply, None);

        // The refetch puts the new record at the head.
        assert_eq!(board.inquiries()[0].id, created.id);
        assert_eq!(board.count(), 2);
        store.assert_invariant();
    }

    #[tokio::test]
    async fn compose_survives_a_failed_followup_refresh() {
        let (mut board, store, _dialogs) = board_with(vec![]).await;

        store.fail_lists.store(true, Ordering::SeqCst);
        let created = board.compose(draft(false, "")).await.unwrap();
        assert_eq!(created.status, InquiryStatus::Pending);

        // The insert stands; the local list just hasn't converged yet.
        assert_eq!(board.count(), 0);
    }

    // ── open ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn open_public_inquiry_needs_no_dialog() {
        let (mut board, _store, dialogs) =
            board_with(vec![record("a", 0, false, "pw")]).await;

        // No responder task: if a dialog were issued this would hang.
        let opened = board.open(Capability::Visitor, "a").await.unwrap();
        assert_eq!(opened.id, "a");
        assert!(dialogs.active().is_none());
        assert_eq!(board.selected().unwrap().id, "a");
    }

    #[tokio::test]
    async fn open_secret_as_operator_bypasses_the_prompt() {
        let (mut board, _store, _dialogs) =
            board_with(vec![record("s", 0, true, "pw")]).await;

        let opened = board.open(Capability::Operator, "s").await.unwrap();
        assert_eq!(opened.id, "s");
        // The full record is returned, password included.
        assert_eq!(opened.password, "pw");
    }

    #[tokio::test]
    async fn open_secret_with_correct_password() {
        let (mut board, _store, dialogs) =
            board_with(vec![record("s", 0, true, "pw")]).await;

        let responder = answer_next(dialogs, Respond::Accept(Some("pw")));
        let opened = board.open(Capability::Visitor, "s").await.unwrap();
        assert_eq!(opened.id, "s");

        let request = responder.await.unwrap();
        assert!(request.secret_input, "password prompt should be masked");
    }

    #[tokio::test]
    async fn open_secret_with_wrong_password_is_denied() {
        let (mut board, store, dialogs) =
            board_with(vec![record("s", 0, true, "pw")]).await;

        let responder = answer_next(dialogs, Respond::Accept(Some("wrong")));
        let err = board.open(Capability::Visitor, "s").await.unwrap_err();
        responder.await.unwrap();

        assert!(matches!(err, BoardError::AccessDenied));
        assert!(board.selected().is_none());

        // The record itself is untouched.
        let stored = store.snapshot("s");
        assert_eq!(stored.status, InquiryStatus::Pending);
        assert_eq!(stored.reply, None);
    }

    #[tokio::test]
    async fn open_secret_with_cancelled_prompt_is_denied() {
        let (mut board, _store, dialogs) =
            board_with(vec![record("s", 0, true, "pw")]).await;

        let responder = answer_next(dialogs, Respond::Cancel);
        let err = board.open(Capability::Visitor, "s").await.unwrap_err();
        responder.await.unwrap();

        assert!(matches!(err, BoardError::AccessDenied));
        assert!(board.selected().is_none());
    }

    #[tokio::test]
    async fn open_unknown_id_is_not_found() {
        let (mut board, _store, _dialogs) = board_with(vec![]).await;
        let err = board.open(Capability::Visitor, "ghost").await.unwrap_err();
        assert!(matches!(err, BoardError::NotFound { .. }));
    }

    // ── reply ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn reply_without_operator_capability_never_reaches_the_store() {
        let (mut board, store, _dialogs) =
            board_with(vec![record("a", 0, false, "")]).await;

        let err = board
            .reply(Capability::Visitor, "a", "nope")
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::NotAuthorized));
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
        assert_eq!(store.snapshot("a").status, InquiryStatus::Pending);
    }

    #[tokio::test]
    async fn reply_patches_locally_and_persists() {
        let (mut board, store, _dialogs) =
            board_with(vec![record("a", 0, false, "")]).await;
        board.open(Capability::Operator, "a").await.unwrap();

        let updated = board
            .reply(Capability::Operator, "a", "Fixed in 1.2.")
            .await
            .unwrap();
        assert_eq!(updated.status, InquiryStatus::Answered);
        assert_eq!(updated.reply.as_deref(), Some("Fixed in 1.2."));

        // Open detail reflects the patch.
        let detail = board.selected().unwrap();
        assert_eq!(detail.status, InquiryStatus::Answered);
        assert_eq!(detail.reply.as_deref(), Some("Fixed in 1.2."));

        assert_eq!(store.updates.load(Ordering::SeqCst), 1);
        store.assert_invariant();
    }

    #[tokio::test]
    async fn reply_unknown_id_is_not_found() {
        let (mut board, store, _dialogs) = board_with(vec![]).await;
        let err = board
            .reply(Capability::Operator, "ghost", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::NotFound { .. }));
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    // ── clear_reply ──────────────────────────────────────────────────

    #[tokio::test]
    async fn clear_reply_requires_operator_capability() {
        let (mut board, store, _dialogs) =
            board_with(vec![record("a", 0, false, "")]).await;

        let err = board
            .clear_reply(Capability::Visitor, "a")
            .await
            .unwrap_err();
        assert!(matches!(err, BoardError::NotAuthorized));
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn clear_reply_cancelled_changes_nothing() {
        let (mut board, store, dialogs) =
            board_with(vec![record("a", 0, false, "")]).await;
        board.reply(Capability::Operator, "a", "done").await.unwrap();
        store.updates.store(0, Ordering::SeqCst);

        let responder = answer_next(dialogs, Respond::Cancel);
        let outcome = board.clear_reply(Capability::Operator, "a").await.unwrap();
        responder.await.unwrap();

        assert!(outcome.is_none());
        assert_eq!(store.updates.load(Ordering::SeqCst), 0);
        let stored = store.snapshot("a");
        assert_eq!(stored.status, InquiryStatus::Answered);
        assert_eq!(stored.reply.as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn clear_reply_confirmed_reverts_to_pending() {
        let (mut board, store, dialogs) =
            board_with(vec![record("a", 0, false, "")]).await;
        board.reply(Capability::Operator, "a", "done").await.unwrap();

        let responder = answer_next(dialogs, Respond::Accept(None));
        let outcome = board.clear_reply(Capability::Operator, "a").await.unwrap();
        responder.await.unwrap();

        let cleared = outcome.expect("clearing should proceed");
        assert_eq!(cleared.status, InquiryStatus::Pending);
        assert_eq!(cleared.reply, None);
        store.assert_invariant();
    }

    // ── delete ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn operator_delete_requires_confirmation() {
        let (mut board, store, dialogs) =
            board_with(vec![record("a", 0, false, "pw")]).await;

        let responder = answer_next(dialogs, Respond::Accept(None));
        let deleted = board.delete(Capability::Operator, "a").await.unwrap();
        responder.await.unwrap();

        assert!(deleted);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(board.count(), 0);
    }

    #[tokio::test]
    async fn operator_delete_cancelled_is_a_no_op() {
        let (mut board, store, dialogs) =
            board_with(vec![record("a", 0, false, "pw")]).await;

        let responder = answer_next(dialogs, Respond::Cancel);
        let deleted = board.delete(Capability::Operator, "a").await.unwrap();
        responder.await.unwrap();

        assert!(!deleted);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
        assert_eq!(board.count(), 1);
    }

    #[tokio::test]
    async fn visitor_delete_with_matching_password() {
        let (mut board, store, dialogs) =
            board_with(vec![record("a", 0, false, "pw")]).await;

        let responder = answer_next(dialogs, Respond::Accept(Some("pw")));
        let deleted = board.delete(Capability::Visitor, "a").await.unwrap();
        responder.await.unwrap();

        assert!(deleted);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn visitor_delete_with_wrong_password_deletes_nothing() {
        let (mut board, store, dialogs) =
            board_with(vec![record("a", 0, true, "pw")]).await;

        let responder = answer_next(dialogs, Respond::Accept(Some("wrong")));
        let err = board.delete(Capability::Visitor, "a").await.unwrap_err();
        responder.await.unwrap();

        assert!(matches!(err, BoardError::AccessDenied));
        assert_eq!(store.deletes.load(Ordering::SeqCst), 0);
        assert_eq!(board.count(), 1);
    }

    #[tokio::test]
    async fn visitor_delete_without_stored_password_skips_the_prompt() {
        let (mut board, store, dialogs) =
            board_with(vec![record("a", 0, false, "")]).await;

        // No responder task: a prompt would hang this test.
        let deleted = board.delete(Capability::Visitor, "a").await.unwrap();
        assert!(deleted);
        assert!(dialogs.active().is_none());
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delete_closes_the_open_detail() {
        let (mut board, _store, dialogs) =
            board_with(vec![record("a", 0, false, ""), record("b", 5, false, "")])
                .await;
        board.open(Capability::Visitor, "a").await.unwrap();
        assert!(board.selected().is_some());

        let deleted = board.delete(Capability::Visitor, "a").await.unwrap();
        assert!(deleted);
        assert!(board.selected().is_none());
        assert!(dialogs.active().is_none());

        // Deleting something else leaves an unrelated detail open.
        board.open(Capability::Visitor, "b").await.unwrap();
        assert_eq!(board.selected().unwrap().id, "b");
    }

    // ── projections & capability ─────────────────────────────────────

    #[tokio::test]
    async fn entries_mask_secret_titles_for_visitors_only() {
        let (board, _store, _dialogs) = board_with(vec![
            record("public", 0, false, ""),
            record("hidden", 5, true, "pw"),
        ])
        .await;

        let visitor = board.entries(Capability::Visitor);
        assert_eq!(visitor[0].title, SECRET_TITLE_PLACEHOLDER);
        assert!(visitor[0].masked);
        assert_eq!(visitor[1].title, "title public");

        let operator = board.entries(Capability::Operator);
        assert_eq!(operator[0].title, "title hidden");
        assert!(!operator[0].masked);
    }

    #[test]
    fn capability_starts_as_visitor_and_toggles() {
        let cap = Capability::default();
        assert!(!cap.is_operator());
        assert!(cap.toggled().is_operator());
        assert_eq!(cap.toggled().toggled(), Capability::Visitor);
    }
}
