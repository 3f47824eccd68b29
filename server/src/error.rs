//! Local error taxonomy for every `/api/*` endpoint.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures are raised at the boundary before any upstream call.
//! Upstream status/transport failures arrive as `UpstreamError` and are
//! re-mapped per operation, so raw upstream messages never reach callers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again.";
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required. Please log in to continue.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Upstream base URL missing.
    #[error("Server configuration error")]
    Configuration,

    /// No session cookie on a request that needs one.
    #[error("{0}")]
    AuthenticationRequired(String),

    /// Login succeeded upstream but no session token came back, or upstream rejected the credentials.
    #[error("{0}")]
    AuthenticationFailed(String),

    /// `check-session` found no local cookie.
    #[error("No valid session")]
    NoSession,

    /// Upstream rejected the token on a profile fetch.
    #[error("Session invalid")]
    SessionInvalid,

    /// Upstream rejected the token on a job operation.
    #[error("{0}")]
    SessionExpired(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Method not allowed. Only {0} requests are accepted.")]
    MethodNotAllowed(&'static str),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("{0}")]
    RateLimited(String),

    /// Upstream 500/503 or unreachable. Keeps the status the caller should see.
    #[error("{message}")]
    ServiceUnavailable { status: u16, message: String },

    #[error("{0}")]
    RequestTimeout(String),

    /// Upstream status outside the fixed vocabulary, passed through.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Configuration | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AuthenticationRequired(_)
            | Self::AuthenticationFailed(_)
            | Self::NoSession
            | Self::SessionInvalid
            | Self::SessionExpired(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            Self::RequestTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            Self::ServiceUnavailable { status, .. } | Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    /// True for every 401-class variant.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == StatusCode::UNAUTHORIZED
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    status_message: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let body = ErrorBody { status_code: status.as_u16(), status_message: message.clone(), message };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
