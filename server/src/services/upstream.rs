//! Upstream job/auth API client.
//!
//! DESIGN
//! ======
//! One shared `reqwest::Client` (connect timeout from config); every call sets
//! its own request timeout so longer-running operations get longer budgets.
//! Failures come back as `UpstreamError` with the HTTP status as a typed
//! field, so callers map statuses without inspecting error shapes.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use reqwest::header::{CONTENT_DISPOSITION, COOKIE, SET_COOKIE};
use serde_json::Value;

use super::session;
use crate::config::GatewayConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream API URL not configured")]
    NotConfigured,

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// Upstream answered with a non-success status.
    #[error("upstream returned {status} {status_text}")]
    Status { status: u16, status_text: String },

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream unreachable: {0}")]
    Connect(String),

    #[error("upstream response could not be decoded: {0}")]
    Decode(String),

    #[error("upstream request failed: {0}")]
    Request(String),
}

impl UpstreamError {
    /// HTTP status of the upstream response, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Binary upstream payload plus the headers the pass-through handlers copy.
#[derive(Debug, Clone)]
pub struct UpstreamBytes {
    pub body: Bytes,
    pub content_disposition: Option<String>,
}

#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Option<Arc<str>>,
}

impl UpstreamClient {
    /// Build the shared client from gateway config.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::ClientBuild`] if the TLS backend cannot initialize.
    pub fn new(config: &GatewayConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| UpstreamError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.api_base_url.as_deref().map(Arc::from) })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn url(&self, path: &str) -> Result<String, UpstreamError> {
        let base = self.base_url.as_deref().ok_or(UpstreamError::NotConfigured)?;
        Ok(format!("{base}{path}"))
    }

    /// POST a JSON body and decode the JSON reply. An empty reply decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] on transport failure, non-success status, or a malformed body.
    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, UpstreamError> {
        let mut request = self.http.post(self.url(path)?).timeout(timeout).json(body);
        if let Some(token) = token {
            request = request.header(COOKIE, session::upstream_cookie_header(token));
        }

        let response = request.send().await.map_err(UpstreamError::from_reqwest)?;
        let response = ensure_success(response)?;
        let text = response.text().await.map_err(UpstreamError::from_reqwest)?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// POST credentials to `/login` and return the `sid` token from `Set-Cookie`, if any.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] on transport failure or non-success status.
    pub async fn login(&self, credentials: &Value, timeout: Duration) -> Result<Option<String>, UpstreamError> {
        let response = self
            .http
            .post(self.url("/login")?)
            .timeout(timeout)
            .json(credentials)
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;
        let response = ensure_success(response)?;

        let values = response.headers().get_all(SET_COOKIE);
        Ok(session::token_from_set_cookie(values.iter().filter_map(|v| v.to_str().ok())))
    }

    /// GET a binary resource with the session cookie attached.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] on transport failure or non-success status.
    pub async fn get_bytes(
        &self,
        path: &str,
        query: &[(&str, &str)],
        token: &str,
        timeout: Duration,
    ) -> Result<UpstreamBytes, UpstreamError> {
        let response = self
            .http
            .get(self.url(path)?)
            .query(query)
            .timeout(timeout)
            .header(COOKIE, session::upstream_cookie_header(token))
            .send()
            .await
            .map_err(UpstreamError::from_reqwest)?;
        let response = ensure_success(response)?;

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(UpstreamError::from_reqwest)?;
        Ok(UpstreamBytes { body, content_disposition })
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(UpstreamError::Status {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown error").to_owned(),
    })
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod tests;
