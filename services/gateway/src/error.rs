use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::ports::OtpRejection;

/// Gateway domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid email address")]
    InvalidEmail,
    #[error("code must be 6 digits")]
    InvalidCode,
    #[error("no code requested for this email")]
    OtpNotFound,
    #[error("code has expired, request a new one")]
    OtpExpired,
    #[error("incorrect code")]
    OtpMismatch,
    #[error("backend unavailable")]
    UpstreamUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidCode => "INVALID_CODE",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::OtpMismatch => "OTP_MISMATCH",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<OtpRejection> for GatewayError {
    fn from(rejection: OtpRejection) -> Self {
        match rejection {
            OtpRejection::NotFound => Self::OtpNotFound,
            OtpRejection::Expired => Self::OtpExpired,
            OtpRejection::Mismatch => Self::OtpMismatch,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidEmail
            | Self::InvalidCode
            | Self::OtpNotFound
            | Self::OtpExpired
            | Self::OtpMismatch => StatusCode::BAD_REQUEST,
            Self::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors; logging them here
        // would be noise. Internal errors need the anyhow chain logged so the
        // root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
