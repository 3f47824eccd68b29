//! HTTP client for the gateway's `/api/auth/*` endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is an `ApiError` carrying the HTTP status when there was a
//! response, so callers branch on `status` instead of inspecting error shapes.
//! The `message` is the gateway's own message when it sent one, otherwise the
//! transport error text.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use reqwest::StatusCode;

use super::types::{Credentials, ErrorBody, LoginResponse, SessionCheck, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status of the failed response; `None` for transport failures.
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    fn transport(err: &reqwest::Error) -> Self {
        Self { status: err.status().map(|s| s.as_u16()), message: err.to_string() }
    }
}

/// Auth endpoints the store depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /api/auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// `POST /api/auth/logout`
    async fn logout(&self) -> Result<(), ApiError>;

    /// `GET /api/auth/check-session`. A 401 means "no session", not an error.
    async fn check_session(&self) -> Result<bool, ApiError>;

    /// `POST /api/auth/user_profile`
    async fn fetch_profile(&self) -> Result<User, ApiError>;
}

/// `AuthApi` over reqwest, with a cookie store so the `sid` cookie issued on
/// login is sent on every later call.
#[derive(Clone)]
pub struct HttpAuthApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthApi {
    /// Client for the dashboard origin, e.g. `https://jobs.example.com`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot initialize.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::transport(&e))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Turn a non-success response into an `ApiError`, preferring the gateway's message.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_default();
    Err(ApiError::new(Some(status.as_u16()), message))
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::transport(&e))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/logout"))
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        check(response).await.map(|_| ())
    }

    async fn check_session(&self) -> Result<bool, ApiError> {
        let response = self
            .http
            .get(self.url("/api/auth/check-session"))
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(false);
        }
        let check: SessionCheck = check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        Ok(check.has_session())
    }

    async fn fetch_profile(&self) -> Result<User, ApiError> {
        let response = self
            .http
            .post(self.url("/api/auth/user_profile"))
            .send()
            .await
            .map_err(|e| ApiError::transport(&e))?;
        check(response)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::transport(&e))
    }
}
