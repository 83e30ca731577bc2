use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use dealgate_session::cookie::{clear_session_cookie, set_session_cookie};

use crate::error::GatewayError;
use crate::state::AppState;
use crate::usecase::request_code::{RequestCodeInput, RequestCodeUseCase};
use crate::usecase::verify_code::{VerifyCodeInput, VerifyCodeUseCase};

// ── POST /auth/otp ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestCodeBody {
    pub email: String,
}

#[derive(Serialize)]
pub struct RequestCodeResponse {
    pub success: bool,
    pub email: String,
    pub skip_otp: bool,
}

pub async fn request_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RequestCodeBody>,
) -> Result<impl IntoResponse, GatewayError> {
    let usecase = RequestCodeUseCase {
        otp: state.otp_store(),
        directory: state.directory(),
        bypass_otp: state.bypass_otp,
        log_codes: !state.production,
    };

    let out = usecase
        .execute(RequestCodeInput { email: body.email })
        .await?;

    // In bypass mode the request itself logs the user in; otherwise the jar
    // passes through untouched.
    let jar = match &out.session {
        Some(session) => set_session_cookie(jar, state.codec.encode(session), state.production),
        None => jar,
    };

    Ok((
        jar,
        Json(RequestCodeResponse {
            success: true,
            email: out.email,
            skip_otp: out.skip_otp,
        }),
    ))
}

// ── POST /auth/session ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyCodeBody {
    pub email: String,
    /// Not required in bypass mode.
    #[serde(default)]
    pub otp: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub user: UserResponse,
}

pub async fn verify_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyCodeBody>,
) -> Result<impl IntoResponse, GatewayError> {
    let usecase = VerifyCodeUseCase {
        otp: state.otp_store(),
        directory: state.directory(),
        bypass_otp: state.bypass_otp,
    };

    // Any failure returns before the cookie is touched: no session is ever
    // set on an error path.
    let out = usecase
        .execute(VerifyCodeInput {
            email: body.email,
            code: body.otp,
        })
        .await?;

    let jar = set_session_cookie(jar, state.codec.encode(&out.session), state.production);

    Ok((
        jar,
        Json(VerifyCodeResponse {
            success: true,
            user: UserResponse {
                id: out.user.id,
                email: out.user.email,
            },
        }),
    ))
}

// ── DELETE /auth/session ─────────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        clear_session_cookie(jar, state.production),
    )
}
