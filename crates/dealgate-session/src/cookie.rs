//! Cookie builders for the session token.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name holding the encoded session.
pub const SESSION_COOKIE: &str = "session";

/// Session cookie Max-Age in seconds (24 hours). Expiry is enforced by the
/// cookie itself; the server never tracks session lifetimes.
pub const SESSION_TTL_SECS: i64 = 86400;

/// Set the session cookie on the jar. `secure` should be true in
/// production-like environments only, so local HTTP development still works.
///
/// ```
/// use axum_extra::extract::cookie::{CookieJar, SameSite};
/// use dealgate_session::cookie::{set_session_cookie, SESSION_COOKIE};
///
/// let jar = set_session_cookie(CookieJar::new(), "opaque".to_string(), true);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert_eq!(cookie.same_site(), Some(SameSite::Lax));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, value: String, secure: bool) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .max_age(Duration::seconds(SESSION_TTL_SECS))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use dealgate_session::cookie::{clear_session_cookie, set_session_cookie, SESSION_COOKIE};
///
/// let jar = set_session_cookie(CookieJar::new(), "opaque".to_string(), false);
/// let jar = clear_session_cookie(jar, false);
/// let cookie = jar.get(SESSION_COOKIE).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, secure: bool) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
