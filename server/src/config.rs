//! Gateway configuration parsed from environment variables.
//!
//! The upstream base URL is optional at startup: a missing URL is reported
//! once as a warning and then surfaces as a 500 on every request that needs
//! the upstream API.

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Base URL variables, checked in order.
const API_URL_VARS: [&str; 2] = ["NUXT_PUBLIC_API_URL", "API_URL"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Upstream job/auth API base URL without a trailing slash.
    pub api_base_url: Option<String>,
    pub port: u16,
    /// Whether the `sid` cookie carries the `Secure` attribute.
    pub secure_cookies: bool,
    pub cookie_http_only: bool,
    pub accept_invalid_certs: bool,
    pub connect_timeout: Duration,
    /// Zero disables the terminated-jobs read cache.
    pub terminated_cache_ttl: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            port: DEFAULT_PORT,
            secure_cookies: false,
            cookie_http_only: false,
            accept_invalid_certs: false,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            terminated_cache_ttl: Duration::ZERO,
        }
    }
}

impl GatewayConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `NUXT_PUBLIC_API_URL` / `API_URL`: upstream base URL
    /// - `PORT`: default 3000
    /// - `APP_ENV`: `production` enables secure cookies
    /// - `COOKIE_SECURE`: explicit override of the secure flag
    /// - `COOKIE_HTTP_ONLY`: default false
    /// - `UPSTREAM_ACCEPT_INVALID_CERTS`: default false
    /// - `UPSTREAM_CONNECT_TIMEOUT_SECS`: default 10
    /// - `TERMINATED_CACHE_TTL_SECS`: default 0 (cache disabled)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = API_URL_VARS
            .iter()
            .find_map(|key| lookup(key).and_then(|raw| normalize_base_url(&raw)));

        let production = lookup("APP_ENV").is_some_and(|env| env.trim().eq_ignore_ascii_case("production"));
        let secure_cookies = parse_bool(lookup("COOKIE_SECURE").as_deref()).unwrap_or(production);

        Self {
            api_base_url,
            port: parse_or(lookup("PORT").as_deref(), DEFAULT_PORT),
            secure_cookies,
            cookie_http_only: parse_bool(lookup("COOKIE_HTTP_ONLY").as_deref()).unwrap_or(false),
            accept_invalid_certs: parse_bool(lookup("UPSTREAM_ACCEPT_INVALID_CERTS").as_deref()).unwrap_or(false),
            connect_timeout: Duration::from_secs(parse_or(
                lookup("UPSTREAM_CONNECT_TIMEOUT_SECS").as_deref(),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            )),
            terminated_cache_ttl: Duration::from_secs(parse_or(lookup("TERMINATED_CACHE_TTL_SECS").as_deref(), 0)),
        }
    }
}

/// Trim whitespace and a trailing slash; blank values count as unset.
pub(crate) fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

pub(crate) fn parse_bool(raw: Option<&str>) -> Option<bool> {
    raw.and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    })
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse::<T>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
