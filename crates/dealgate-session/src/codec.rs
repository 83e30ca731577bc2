use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Authenticated identity held by the client as an opaque cookie value.
///
/// The record is client-owned and untrusted on the way back in: the codec
/// verifies the HMAC tag before parsing, and callers treat any decode failure
/// as "no session", never as a fault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Normalized (trimmed, lower-cased) email the session was issued for.
    pub email: String,
    /// Stable user id from the directory, or the deterministic fallback hash.
    pub user_id: String,
    /// Issuance time as unix seconds.
    pub created_at: i64,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("malformed session value")]
    Malformed,
    #[error("session signature mismatch")]
    BadSignature,
}

/// Encodes sessions as `base64url(json) "." base64url(hmac-sha256(json))`.
#[derive(Clone)]
pub struct SessionCodec {
    secret: Vec<u8>,
}

impl SessionCodec {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn tag(&self, payload: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC-SHA256 accepts keys of any length");
        mac.update(payload);
        mac
    }

    pub fn encode(&self, session: &Session) -> String {
        let payload = serde_json::to_vec(session).expect("session serializes to JSON");
        let tag = self.tag(&payload).finalize().into_bytes();
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag)
        )
    }

    /// Verify the tag and parse the payload. The tag check runs first so a
    /// forged payload is never deserialized.
    pub fn decode(&self, value: &str) -> Result<Session, SessionError> {
        let (payload_b64, tag_b64) = value.split_once('.').ok_or(SessionError::Malformed)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| SessionError::Malformed)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| SessionError::Malformed)?;
        self.tag(&payload)
            .verify_slice(&tag)
            .map_err(|_| SessionError::BadSignature)?;
        serde_json::from_slice(&payload).map_err(|_| SessionError::Malformed)
    }
}
