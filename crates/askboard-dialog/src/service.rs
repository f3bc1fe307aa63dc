//! The single-slot dialog service.

use std::sync::Arc;

use tokio::sync::{Mutex, oneshot, watch};
use tracing::debug;

use crate::error::DialogError;
use crate::request::{DialogAnswer, DialogKind, DialogOptions, DialogRequest};

/// Awaitable user-prompt primitive with a single pending slot.
///
/// The service is cheaply cloneable (`Arc`-backed) and `Send + Sync`. One
/// clone lives with the workflow issuing questions, another with the
/// frontend answering them.
///
/// Requests suspend the caller until the frontend resolves them with
/// [`accept`](DialogService::accept) or [`cancel`](DialogService::cancel);
/// resolution clears the slot and immediately allows the next request.
#[derive(Clone)]
pub struct DialogService {
    inner: Arc<DialogInner>,
}

struct DialogInner {
    /// Continuation for the pending request, if any.
    slot: Mutex<Option<oneshot::Sender<DialogAnswer>>>,

    /// The request currently shown to the user (`None` when the slot is
    /// clear). Frontends watch this to know what to render.
    current: watch::Sender<Option<DialogRequest>>,
}

impl DialogService {
    /// Create a service with an empty slot.
    #[must_use]
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(DialogInner {
                slot: Mutex::new(None),
                current,
            }),
        }
    }

    // ── caller side ──────────────────────────────────────────────────

    /// Display `message` with a single acknowledge action and wait for it.
    pub async fn alert(
        &self,
        message: impl Into<String>,
        options: DialogOptions,
    ) -> Result<(), DialogError> {
        let request = DialogRequest::new(DialogKind::Alert, message, options);
        self.request(request).await.map(|_| ())
    }

    /// Ask a yes/no question. Resolves `true` on accept, `false` on cancel
    /// or dismiss.
    pub async fn confirm(
        &self,
        message: impl Into<String>,
        options: DialogOptions,
    ) -> Result<bool, DialogError> {
        let request = DialogRequest::new(DialogKind::Confirm, message, options);
        let answer = self.request(request).await?;
        Ok(matches!(answer, DialogAnswer::Confirmed(true)))
    }

    /// Ask for a line of text (masked when `options.secret_input`).
    /// Resolves with the entered text on accept, `None` on cancel or
    /// dismiss.
    pub async fn prompt(
        &self,
        message: impl Into<String>,
        options: DialogOptions,
    ) -> Result<Option<String>, DialogError> {
        let request = DialogRequest::new(DialogKind::Prompt, message, options);
        match self.request(request).await? {
            DialogAnswer::Submitted(text) => Ok(text),
            _ => Ok(None),
        }
    }

    /// Occupy the slot with `request` and suspend until it is resolved.
    async fn request(&self, request: DialogRequest) -> Result<DialogAnswer, DialogError> {
        let rx = {
            let mut slot = self.inner.slot.lock().await;
            if slot.is_some() {
                return Err(DialogError::SlotBusy);
            }
            let (tx, rx) = oneshot::channel();
            *slot = Some(tx);
            debug!(kind = %request.kind, "dialog displayed");
            self.inner.current.send_replace(Some(request));
            rx
        };

        // The lock is released while we wait; resolution may never come if
        // the user abandons the surrounding view, in which case this future
        // simply stays pending until dropped.
        rx.await.map_err(|_| DialogError::Abandoned)
    }

    // ── frontend side ────────────────────────────────────────────────

    /// Observe the active request. The receiver holds `None` whenever the
    /// slot is clear.
    pub fn subscribe(&self) -> watch::Receiver<Option<DialogRequest>> {
        self.inner.current.subscribe()
    }

    /// The request currently occupying the slot, if any.
    pub fn active(&self) -> Option<DialogRequest> {
        self.inner.current.borrow().clone()
    }

    /// Resolve the active dialog with confirm semantics (confirm button or
    /// the accept key): alerts acknowledge, confirms resolve `true`,
    /// prompts resolve with `input`.
    pub async fn accept(&self, input: Option<String>) -> Result<(), DialogError> {
        self.finish(|kind| match kind {
            DialogKind::Alert => DialogAnswer::Acknowledged,
            DialogKind::Confirm => DialogAnswer::Confirmed(true),
            DialogKind::Prompt => DialogAnswer::Submitted(Some(input.unwrap_or_default())),
        })
        .await
    }

    /// Resolve the active dialog with cancel semantics (cancel button, the
    /// cancel key, or clicking outside): alerts acknowledge, confirms
    /// resolve `false`, prompts resolve `None`.
    pub async fn cancel(&self) -> Result<(), DialogError> {
        self.finish(|kind| match kind {
            DialogKind::Alert => DialogAnswer::Acknowledged,
            DialogKind::Confirm => DialogAnswer::Confirmed(false),
            DialogKind::Prompt => DialogAnswer::Submitted(None),
        })
        .await
    }

    /// Take the pending continuation, clear the slot, and deliver the
    /// answer derived from the active request's kind.
    async fn finish(
        &self,
        answer_for: impl FnOnce(DialogKind) -> DialogAnswer,
    ) -> Result<(), DialogError> {
        let mut slot = self.inner.slot.lock().await;
        let tx = slot.take().ok_or(DialogError::NoActiveDialog)?;
        let kind = self
            .inner
            .current
            .borrow()
            .as_ref()
            .map(|r| r.kind)
            .ok_or(DialogError::NoActiveDialog)?;

        self.inner.current.send_replace(None);
        debug!(kind = %kind, "dialog resolved");

        if tx.send(answer_for(kind)).is_err() {
            // The requester stopped waiting; the slot is clear either way.
            debug!("dialog answer dropped, requester went away");
        }
        Ok(())
    }
}

impl Default for DialogService {
    fn default() -> Self {
        Self::new()
    }
}

// ── tests ────────────────────────────────────────────────────────────
