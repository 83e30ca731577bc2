use std::time::Duration;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::ports::UserDirectory;
use crate::domain::types::{Resolved, ResolvedUser, normalize_email};

/// Outbound timeout for directory calls. Resolution sits on the login path,
/// so it fails fast into the fallback instead of hanging the caller.
const DIRECTORY_TIMEOUT: Duration = Duration::from_secs(5);

/// Hex length of the deterministic fallback id.
const FALLBACK_ID_LEN: usize = 16;

/// Deterministic degraded-mode id: truncated hex SHA-256 of the normalized
/// email. Stable across process restarts, so a directory outage does not
/// fork identities.
pub fn fallback_id(normalized_email: &str) -> String {
    let digest = Sha256::digest(normalized_email.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    hex[..FALLBACK_ID_LEN].to_owned()
}

#[derive(Serialize)]
struct ResolveRequest<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Deserialize)]
struct ResolveResponse {
    id: String,
    email: String,
}

/// HTTP adapter for the user-directory service.
#[derive(Clone)]
pub struct HttpUserDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserDirectory {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

impl UserDirectory for HttpUserDirectory {
    async fn resolve(&self, email: &str, name: Option<&str>) -> Resolved {
        let email = normalize_email(email);
        let url = format!("{}/users/resolve", self.base_url.trim_end_matches('/'));
        let result = self
            .client
            .post(&url)
            .timeout(DIRECTORY_TIMEOUT)
            .json(&ResolveRequest {
                email: email.as_str(),
                name,
            })
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => match resp.json::<ResolveResponse>().await {
                Ok(body) => {
                    return Resolved::Directory(ResolvedUser {
                        id: body.id,
                        email: body.email,
                    });
                }
                Err(e) => tracing::warn!(error = %e, "directory returned unparseable body"),
            },
            Ok(resp) => tracing::warn!(status = %resp.status(), "directory rejected resolution"),
            Err(e) => tracing::warn!(error = %e, "directory unreachable"),
        }

        Resolved::Fallback(ResolvedUser {
            id: fallback_id(&email),
            email,
        })
    }
}
