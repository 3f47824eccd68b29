//! Session cookie transport.
//!
//! ARCHITECTURE
//! ============
//! The upstream API issues an opaque `sid` token on login. The gateway
//! re-issues it as a first-party cookie and attaches it as `Cookie: sid=...`
//! to every authenticated upstream call. Nothing here inspects the token.
//! Removing the first-party cookie is the only logout signal the rest of the
//! system recognizes.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config::GatewayConfig;

pub const SESSION_COOKIE_NAME: &str = "sid";
pub const SESSION_MAX_AGE_DAYS: i64 = 30;

/// Read the session token from an incoming request's cookies.
/// Empty values count as absent.
#[must_use]
pub fn session_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE_NAME)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// `Cookie` header value for an upstream call.
#[must_use]
pub fn upstream_cookie_header(token: &str) -> String {
    format!("{SESSION_COOKIE_NAME}={token}")
}

/// Extract the session token from upstream `Set-Cookie` values.
///
/// Only the `name=value` pair before the first `;` is considered. The first
/// non-empty `sid` wins.
pub fn token_from_set_cookie<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<String> {
    values.into_iter().find_map(|raw| {
        let pair = raw.split(';').next()?.trim();
        let (name, value) = pair.split_once('=')?;
        (name.trim() == SESSION_COOKIE_NAME && !value.is_empty()).then(|| value.to_owned())
    })
}

/// First-party session cookie: 30-day max age, lax same-site, path `/`.
#[must_use]
pub fn session_cookie(token: String, config: &GatewayConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(config.cookie_http_only)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(Duration::days(SESSION_MAX_AGE_DAYS))
        .build()
}

/// Expired replacement that makes the browser drop the session cookie.
#[must_use]
pub fn removal_cookie(config: &GatewayConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(config.cookie_http_only)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies)
        .max_age(Duration::ZERO)
        .build()
}

/// Response jar carrying only the cookie removal.
#[must_use]
pub fn clear_session(config: &GatewayConfig) -> CookieJar {
    CookieJar::new().add(removal_cookie(config))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
