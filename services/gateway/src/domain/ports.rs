#![allow(async_fn_in_trait)]

use crate::domain::types::Resolved;

/// Why an OTP verification was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpRejection {
    /// No pending code for this email.
    NotFound,
    /// Code existed but its expiry passed. The entry is deleted.
    Expired,
    /// Candidate differs from the stored code. The entry is kept so a retry
    /// with the correct code can still succeed before expiry.
    Mismatch,
}

/// Store for pending one-time passwords, keyed by normalized email.
///
/// Injected into the usecases rather than living as process-global state, so
/// tests run against the in-memory adapter and multi-instance deployments can
/// substitute a shared store.
pub trait OtpStore: Send + Sync {
    /// Generate and store a fresh code for the email, replacing any prior
    /// pending entry. Returns the code for out-of-band delivery only — it
    /// must never appear in an HTTP response.
    async fn issue(&self, email: &str) -> String;

    /// Check a candidate code. Consumes the entry on success (exactly-once):
    /// a matched code cannot be verified a second time.
    async fn verify(&self, email: &str, candidate: &str) -> Result<(), OtpRejection>;

    /// Delete expired entries. Returns how many were removed.
    async fn sweep(&self) -> usize;
}

/// Port for resolving a stable user id for an email.
pub trait UserDirectory: Send + Sync {
    /// Never fails from the caller's point of view: directory errors degrade
    /// into `Resolved::Fallback` with a deterministic hash id. Login must not
    /// break merely because the directory is down.
    async fn resolve(&self, email: &str, name: Option<&str>) -> Resolved;
}
