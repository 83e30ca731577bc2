use axum::http::StatusCode;

/// Handler for `GET /healthz` — liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz` — readiness check. The gateway holds no durable
/// state, so readiness and liveness are the same.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
