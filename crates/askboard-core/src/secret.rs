//! Password verification seam.
//!
//! Inquiry secrets are compared in plaintext. Keeping the comparison
//! behind a trait lets a salted-hash scheme replace it without touching
//! any workflow call site.

use crate::inquiry::Inquiry;

/// Decides whether a candidate secret unlocks a record.
pub trait SecretVerifier: Send + Sync {
    /// `true` iff `candidate` unlocks `record`.
    fn verify(&self, candidate: &str, record: &Inquiry) -> bool;
}

/// Byte-for-byte plaintext comparison, case-sensitive.
///
/// An empty stored password makes the record openable with an empty
/// submission; a stricter scheme slots in behind [`SecretVerifier`]
/// without touching the workflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl SecretVerifier for PlaintextVerifier {
    fn verify(&self, candidate: &str, record: &Inquiry) -> bool {
        candidate == record.password
    }
}

// ── tests ────────────────────────────────────────────────────────────
