pub mod request_code;
pub mod verify_code;

use chrono::Utc;
use dealgate_session::Session;

use crate::domain::types::ResolvedUser;

/// Mint a session for a resolved user. The only two call sites are the two
/// usecases, keeping the invariant that a session is never created without a
/// verified (or bypassed) identity.
pub(crate) fn session_for(user: &ResolvedUser) -> Session {
    Session {
        email: user.email.clone(),
        user_id: user.id.clone(),
        created_at: Utc::now().timestamp(),
    }
}
