use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use tokio::task::JoinHandle;

use crate::domain::ports::{OtpRejection, OtpStore};
use crate::domain::types::{OTP_TTL_SECS, PendingOtp, normalize_email};

fn generate_code() -> String {
    // Uniform over the six-digit range; thread rng is a CSPRNG.
    rand::rng().random_range(100_000..=999_999).to_string()
}

/// In-memory OTP store. One lock covers the whole map, so `issue`, `verify`
/// and `sweep` are mutually exclusive and two concurrent verifies for the
/// same email can never both consume a code. Contents are lost on restart,
/// which is acceptable for ten-minute codes.
#[derive(Clone, Default)]
pub struct MemoryOtpStore {
    entries: Arc<Mutex<HashMap<String, PendingOtp>>>,
}

impl MemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending (not yet swept) entries. Test observability.
    pub fn pending_count(&self) -> usize {
        self.entries.lock().expect("otp store lock poisoned").len()
    }

    /// Insert a pre-built entry, bypassing code generation. Lets tests stage
    /// expired entries without waiting out the TTL.
    pub fn insert_pending(&self, email: &str, entry: PendingOtp) {
        self.entries
            .lock()
            .expect("otp store lock poisoned")
            .insert(normalize_email(email), entry);
    }
}

impl OtpStore for MemoryOtpStore {
    async fn issue(&self, email: &str) -> String {
        let code = generate_code();
        let entry = PendingOtp {
            code: code.clone(),
            expires_at: Utc::now() + chrono::Duration::seconds(OTP_TTL_SECS),
        };
        self.entries
            .lock()
            .expect("otp store lock poisoned")
            .insert(normalize_email(email), entry);
        code
    }

    async fn verify(&self, email: &str, candidate: &str) -> Result<(), OtpRejection> {
        let key = normalize_email(email);
        let mut entries = self.entries.lock().expect("otp store lock poisoned");
        let entry = entries.get(&key).ok_or(OtpRejection::NotFound)?;
        if entry.is_expired() {
            entries.remove(&key);
            return Err(OtpRejection::Expired);
        }
        if entry.code != candidate {
            return Err(OtpRejection::Mismatch);
        }
        entries.remove(&key);
        Ok(())
    }

    async fn sweep(&self) -> usize {
        let mut entries = self.entries.lock().expect("otp store lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }
}

/// Spawn the periodic expiry sweep as an owned background task. The handle
/// belongs to the process lifecycle: abort it on shutdown.
pub fn spawn_sweeper(store: MemoryOtpStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(period);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tick.tick().await;
            let removed = store.sweep().await;
            if removed > 0 {
                tracing::debug!(removed, "swept expired otp entries");
            }
        }
    })
}
