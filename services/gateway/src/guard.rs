//! Pre-routing session gate.
//!
//! The guard inspects only the *presence* of the session cookie, never its
//! decoded validity — decoding happens downstream in the handlers that
//! actually need the identity.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use dealgate_session::cookie::SESSION_COOKIE;

/// Login/signup pages: reachable without a session, but a user who already
/// holds one is sent home to prevent re-login loops.
const PUBLIC_PATHS: &[&str] = &["/auth/login", "/auth/signup"];

/// Always admitted: API-style and internal asset paths. Authentication for
/// these is enforced downstream (or not at all, for assets).
const OPEN_PREFIXES: &[&str] = &["/api/", "/auth/", "/proxy/", "/_next/", "/assets/"];
const OPEN_PATHS: &[&str] = &["/healthz", "/readyz", "/favicon.ico"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin { session_expired: bool },
    RedirectToHome,
}

pub fn decide(path: &str, has_session: bool) -> GuardDecision {
    // Public paths come first so a logged-in user hitting the login page is
    // redirected home even though /auth/ is otherwise an open prefix.
    if PUBLIC_PATHS.contains(&path) {
        return if has_session {
            GuardDecision::RedirectToHome
        } else {
            GuardDecision::Allow
        };
    }
    if path == "/" {
        return if has_session {
            GuardDecision::Allow
        } else {
            GuardDecision::RedirectToLogin {
                session_expired: false,
            }
        };
    }
    if OPEN_PATHS.contains(&path) || OPEN_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return GuardDecision::Allow;
    }
    if has_session {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin {
            session_expired: true,
        }
    }
}

/// Middleware applying [`decide`] to every request.
pub async fn route_guard(jar: CookieJar, request: Request, next: Next) -> Response {
    let has_session = jar.get(SESSION_COOKIE).is_some();
    match decide(request.uri().path(), has_session) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::RedirectToHome => Redirect::temporary("/").into_response(),
        GuardDecision::RedirectToLogin { session_expired } => {
            let target = if session_expired {
                "/auth/login?session_expired=true"
            } else {
                "/auth/login"
            };
            Redirect::temporary(target).into_response()
        }
    }
}
