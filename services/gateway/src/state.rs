use dealgate_session::SessionCodec;

use crate::infra::directory::HttpUserDirectory;
use crate::infra::memory::MemoryOtpStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub otp: MemoryOtpStore,
    pub http: reqwest::Client,
    pub codec: SessionCodec,
    pub backend_base_url: String,
    pub directory_url: String,
    pub bypass_otp: bool,
    pub production: bool,
}

impl AppState {
    pub fn otp_store(&self) -> MemoryOtpStore {
        self.otp.clone()
    }

    pub fn directory(&self) -> HttpUserDirectory {
        HttpUserDirectory::new(self.http.clone(), self.directory_url.clone())
    }
}
