use dealgate_session::Session;

use crate::domain::ports::{OtpStore, UserDirectory};
use crate::domain::types::{ResolvedUser, is_valid_email, is_valid_otp, normalize_email};
use crate::error::GatewayError;
use crate::usecase::session_for;

pub struct VerifyCodeInput {
    pub email: String,
    pub code: String,
}

pub struct VerifyCodeOutput {
    pub user: ResolvedUser,
    pub session: Session,
}

pub struct VerifyCodeUseCase<O, D>
where
    O: OtpStore,
    D: UserDirectory,
{
    pub otp: O,
    pub directory: D,
    pub bypass_otp: bool,
}

impl<O, D> VerifyCodeUseCase<O, D>
where
    O: OtpStore,
    D: UserDirectory,
{
    pub async fn execute(&self, input: VerifyCodeInput) -> Result<VerifyCodeOutput, GatewayError> {
        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(GatewayError::InvalidEmail);
        }

        if !self.bypass_otp {
            if !is_valid_otp(&input.code) {
                return Err(GatewayError::InvalidCode);
            }
            self.otp.verify(&email, &input.code).await?;
        }

        let resolved = self.directory.resolve(&email, None).await;
        if resolved.is_fallback() {
            tracing::warn!(%email, "resolved identity via fallback hash");
        }
        let user = resolved.into_user();
        let session = session_for(&user);

        Ok(VerifyCodeOutput { user, session })
    }
}
