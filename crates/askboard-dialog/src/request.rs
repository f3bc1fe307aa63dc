//! Dialog request and answer types.

use serde::{Deserialize, Serialize};

/// Which modal shape a request presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    /// A message with a single acknowledge action.
    Alert,
    /// A yes/no question.
    Confirm,
    /// A free-text (or masked) input with confirm/cancel.
    Prompt,
}

impl std::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Alert => "alert",
            Self::Confirm => "confirm",
            Self::Prompt => "prompt",
        };
        f.write_str(s)
    }
}

/// Optional display overrides for a request.
///
/// Any field left unset falls back to the per-kind default (see
/// [`DialogRequest::new`]).
#[derive(Debug, Clone, Default)]
pub struct DialogOptions {
    /// Title line shown above the message.
    pub title: Option<String>,
    /// Label for the confirm action.
    pub confirm_label: Option<String>,
    /// Label for the cancel action (ignored for alerts).
    pub cancel_label: Option<String>,
    /// Placeholder text for the prompt input.
    pub placeholder: Option<String>,
    /// Mask the prompt input (password entry).
    pub secret_input: bool,
}

impl DialogOptions {
    /// Options for a masked password prompt.
    pub fn secret() -> Self {
        Self {
            secret_input: true,
            ..Self::default()
        }
    }
}

/// A fully resolved request as shown to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    /// `None` for alerts, which have no cancel action.
    pub cancel_label: Option<String>,
    pub placeholder: String,
    pub secret_input: bool,
}

impl DialogRequest {
    /// Build a request, filling unset options with the kind's defaults.
    pub fn new(kind: DialogKind, message: impl Into<String>, options: DialogOptions) -> Self {
        let (title, confirm_label, cancel_label) = match kind {
            DialogKind::Alert => ("Notice", "OK", None),
            DialogKind::Confirm => ("Confirm", "Yes", Some("No")),
            DialogKind::Prompt => ("Input required", "OK", Some("Cancel")),
        };

        Self {
            kind,
            title: options.title.unwrap_or_else(|| title.to_string()),
            message: message.into(),
            confirm_label: options
                .confirm_label
                .unwrap_or_else(|| confirm_label.to_string()),
            cancel_label: match kind {
                DialogKind::Alert => None,
                _ => options
                    .cancel_label
                    .or_else(|| cancel_label.map(str::to_string)),
            },
            placeholder: options.placeholder.unwrap_or_default(),
            secret_input: options.secret_input,
        }
    }
}

/// The resolved outcome delivered back to the suspended caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAnswer {
    /// An alert was acknowledged.
    Acknowledged,
    /// A confirm resolved: `true` on accept, `false` on cancel or dismiss.
    Confirmed(bool),
    /// A prompt resolved: entered text on accept, `None` on cancel or
    /// dismiss.
    Submitted(Option<String>),
}
