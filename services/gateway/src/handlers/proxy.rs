use std::time::Duration;

use axum::{
    Json,
    body::Body,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method, header},
    response::Response,
};
use axum_extra::extract::CookieJar;
use url::Url;

use dealgate_session::cookie::SESSION_COOKIE;

use crate::error::GatewayError;
use crate::state::AppState;

/// Outbound timeout for backend calls. Forwarding is at-most-once: on timeout
/// or network failure the caller gets a 502 and may retry itself.
const PROXY_TIMEOUT: Duration = Duration::from_secs(10);

/// Query parameter / body field carrying the session identity to the backend.
const USER_EMAIL_FIELD: &str = "user_email";

/// Build the upstream URL: backend base joined with the forwarded path, the
/// original query preserved, and `user_email` appended for read/delete-style
/// methods when a session identity is present.
fn build_target(
    base: &str,
    path: &str,
    query: Option<&str>,
    identity: Option<&str>,
    method: &Method,
) -> Result<Url, GatewayError> {
    let mut url = Url::parse(&format!("{}/{}", base.trim_end_matches('/'), path))
        .map_err(|e| GatewayError::Internal(anyhow::anyhow!("invalid proxy target: {e}")))?;
    url.set_query(query.filter(|q| !q.is_empty()));
    if matches!(*method, Method::GET | Method::DELETE) {
        if let Some(email) = identity {
            url.query_pairs_mut().append_pair(USER_EMAIL_FIELD, email);
        }
    }
    Ok(url)
}

/// Merge the session identity into a JSON body for write-style methods. An
/// absent body becomes a minimal `{"user_email": ...}` object; a non-object
/// body passes through untouched.
fn inject_identity(
    body: Option<serde_json::Value>,
    identity: Option<&str>,
) -> Option<serde_json::Value> {
    let Some(email) = identity else { return body };
    match body {
        Some(serde_json::Value::Object(mut map)) => {
            map.insert(
                USER_EMAIL_FIELD.to_owned(),
                serde_json::Value::String(email.to_owned()),
            );
            Some(serde_json::Value::Object(map))
        }
        Some(other) => Some(other),
        None => Some(serde_json::json!({ USER_EMAIL_FIELD: email })),
    }
}

/// Handler for `GET|POST|PUT|DELETE /proxy/{*path}` — forwards the request to
/// the backend with the session identity attached and relays the backend's
/// status and body verbatim.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    jar: CookieJar,
    body: Option<Json<serde_json::Value>>,
) -> Result<Response, GatewayError> {
    // The Route Guard admits /proxy/* unconditionally; a missing or
    // undecodable session just means no identity is attached and the backend
    // decides what anonymous requests may do.
    let session = jar
        .get(SESSION_COOKIE)
        .and_then(|c| state.codec.decode(c.value()).ok());
    let identity = session.as_ref().map(|s| s.email.as_str());

    let url = build_target(
        &state.backend_base_url,
        &path,
        query.as_deref(),
        identity,
        &method,
    )?;

    let mut request = state
        .http
        .request(method.clone(), url.as_str())
        .timeout(PROXY_TIMEOUT);

    // Content negotiation only; the rest of the inbound headers (cookies
    // included) stay on this side of the boundary.
    if let Some(accept) = headers.get(header::ACCEPT) {
        request = request.header(header::ACCEPT, accept.clone());
    }

    if matches!(method, Method::POST | Method::PUT) {
        if let Some(json) = inject_identity(body.map(|Json(v)| v), identity) {
            request = request.json(&json);
        }
    }

    let upstream = request.send().await.map_err(|e| {
        tracing::warn!(error = %e, %url, "backend forwarding failed");
        GatewayError::UpstreamUnavailable
    })?;

    let status = upstream.status().as_u16();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream.bytes().await.map_err(|e| {
        tracing::warn!(error = %e, "failed reading backend response");
        GatewayError::UpstreamUnavailable
    })?;

    let mut response = Response::builder().status(status);
    if let Some(ct) = content_type {
        response = response.header(header::CONTENT_TYPE, ct);
    }
    response
        .body(Body::from(bytes.to_vec()))
        .map_err(|e| GatewayError::Internal(e.into()))
}
