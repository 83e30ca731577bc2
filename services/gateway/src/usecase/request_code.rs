use dealgate_session::Session;

use crate::domain::ports::{OtpStore, UserDirectory};
use crate::domain::types::{display_name_from_email, is_valid_email, normalize_email};
use crate::error::GatewayError;
use crate::usecase::session_for;

pub struct RequestCodeInput {
    pub email: String,
}

pub struct RequestCodeOutput {
    pub email: String,
    /// True in bypass mode: the client should skip code entry entirely.
    pub skip_otp: bool,
    /// Present only in bypass mode, where the request itself logs the user in.
    pub session: Option<Session>,
}

pub struct RequestCodeUseCase<O, D>
where
    O: OtpStore,
    D: UserDirectory,
{
    pub otp: O,
    pub directory: D,
    pub bypass_otp: bool,
    /// Log issued codes at debug level. Development convenience only; must be
    /// false in production so codes never reach the logs.
    pub log_codes: bool,
}

impl<O, D> RequestCodeUseCase<O, D>
where
    O: OtpStore,
    D: UserDirectory,
{
    pub async fn execute(
        &self,
        input: RequestCodeInput,
    ) -> Result<RequestCodeOutput, GatewayError> {
        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(GatewayError::InvalidEmail);
        }

        if self.bypass_otp {
            // Bypass collapses CodeRequested into an always-pass transition:
            // resolve and log the user in without storing any OTP.
            let name = display_name_from_email(&email);
            let resolved = self.directory.resolve(&email, Some(&name)).await;
            if resolved.is_fallback() {
                tracing::warn!(%email, "issuing session with fallback identity");
            }
            let session = session_for(resolved.user());
            return Ok(RequestCodeOutput {
                email,
                skip_otp: true,
                session: Some(session),
            });
        }

        let code = self.otp.issue(&email).await;
        // Delivery is the mailer's job, out of band. The response never
        // carries the code; this debug line is gated on a non-production flag.
        if self.log_codes {
            tracing::debug!(%email, %code, "issued otp (dev code logging enabled)");
        } else {
            tracing::info!(%email, "issued otp");
        }

        Ok(RequestCodeOutput {
            email,
            skip_otp: false,
            session: None,
        })
    }
}
