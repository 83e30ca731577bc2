use chrono::{DateTime, Utc};
use regex::Regex;

/// A pending one-time password awaiting verification.
#[derive(Debug, Clone)]
pub struct PendingOtp {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl PendingOtp {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Identity produced by user resolution. Not persisted here; the backend owns
/// the user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub id: String,
    pub email: String,
}

/// How the identity was obtained. `Fallback` means the directory did not
/// answer and the id is a deterministic hash of the email — degraded mode,
/// kept as a tagged variant so operators can detect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Directory(ResolvedUser),
    Fallback(ResolvedUser),
}

impl Resolved {
    pub fn user(&self) -> &ResolvedUser {
        match self {
            Self::Directory(user) | Self::Fallback(user) => user,
        }
    }

    pub fn into_user(self) -> ResolvedUser {
        match self {
            Self::Directory(user) | Self::Fallback(user) => user,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// OTP length in digits.
pub const OTP_LEN: usize = 6;

/// OTP time-to-live in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

/// Interval between expiry sweeps of the OTP store, in seconds.
pub const OTP_SWEEP_INTERVAL_SECS: u64 = 60;

/// Normalize an email for use as a store key: trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

pub fn is_valid_otp(code: &str) -> bool {
    code.len() == OTP_LEN && code.bytes().all(|b| b.is_ascii_digit())
}

/// Derive a display name from the email local part: separators become spaces
/// and the first letter is capitalized. Used when registering a user with the
/// directory in bypass mode.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let spaced: String = local
        .chars()
        .map(|c| if matches!(c, '.' | '_' | '-') { ' ' } else { c })
        .collect();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
