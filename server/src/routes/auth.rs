//! Auth routes: login, logout, session check and profile fetch against the
//! upstream API, plus the `Session` extractor every job route requires.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{FromRef, State};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{Value, json};

use crate::error::{AUTH_REQUIRED_MESSAGE, ApiError};
use crate::services::jobs::parse_body;
use crate::services::session;
use crate::services::upstream::UpstreamError;
use crate::state::AppState;

const AUTH_TIMEOUT: Duration = Duration::from_secs(10);

// =============================================================================
// SESSION EXTRACTOR
// =============================================================================

/// Session token from the `sid` cookie.
/// Use as a handler parameter to require a session before any upstream call.
pub struct Session {
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        if !app_state.upstream.is_configured() {
            tracing::error!("upstream API URL not configured");
            return Err(ApiError::Configuration);
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = session::session_token(&jar) else {
            tracing::warn!(path = %parts.uri.path(), "no session cookie on authenticated route");
            return Err(ApiError::AuthenticationRequired(AUTH_REQUIRED_MESSAGE.into()));
        };
        Ok(Self { token })
    }
}

/// Map an upstream failure on an auth call. `unauthorized` replaces a 401.
fn map_auth_failure(err: &UpstreamError, unauthorized: ApiError) -> ApiError {
    match err {
        UpstreamError::Status { status: 401, .. } => unauthorized,
        UpstreamError::Status { status, status_text } => {
            ApiError::Upstream { status: *status, message: status_text.clone() }
        }
        UpstreamError::NotConfigured => ApiError::Configuration,
        UpstreamError::Timeout => ApiError::RequestTimeout("Authentication service timed out. Please try again.".into()),
        UpstreamError::Connect(_) => ApiError::ServiceUnavailable {
            status: 503,
            message: "Unable to connect to the authentication service.".into(),
        },
        UpstreamError::ClientBuild(_) | UpstreamError::Decode(_) | UpstreamError::Request(_) => {
            ApiError::Internal("An unexpected error occurred during authentication.".into())
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/login`: forward credentials, re-issue the session cookie,
/// and return the profile fetched with the new token.
pub async fn login(State(state): State<AppState>, body: Bytes) -> Response {
    if !state.upstream.is_configured() {
        tracing::error!("upstream API URL not configured");
        return ApiError::Configuration.into_response();
    }

    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => return e.into_response(),
    };
    let credentials = json!({
        "login": body.get("login").cloned().unwrap_or(Value::Null),
        "password": body.get("password").cloned().unwrap_or(Value::Null),
    });

    let token = match state.upstream.login(&credentials, AUTH_TIMEOUT).await {
        Ok(Some(token)) => token,
        Ok(None) => {
            tracing::warn!("upstream login succeeded without a session cookie");
            return ApiError::AuthenticationFailed("No authentication token received".into()).into_response();
        }
        Err(e) => {
            tracing::warn!(error = %e, "upstream login failed");
            return map_auth_failure(&e, ApiError::AuthenticationFailed("Authentication failed".into()))
                .into_response();
        }
    };

    let jar = CookieJar::new().add(session::session_cookie(token.clone(), &state.config));

    let user = match state
        .upstream
        .post_json("/user_profile", Some(&token), &json!({}), AUTH_TIMEOUT)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "profile fetch after login failed");
            let err = map_auth_failure(&e, ApiError::AuthenticationFailed("Authentication failed".into()));
            return (jar, err).into_response();
        }
    };

    tracing::info!("login succeeded");
    (jar, Json(json!({ "success": true, "data": { "token": token, "user": user } }))).into_response()
}

/// `POST /api/auth/logout`: best-effort upstream logout; always clears the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(token) = session::session_token(&jar) {
        if state.upstream.is_configured()
            && let Err(e) = state
                .upstream
                .post_json("/logout", Some(&token), &json!({}), AUTH_TIMEOUT)
                .await
        {
            tracing::warn!(error = %e, "upstream logout failed; clearing local session anyway");
        }
        state.terminated_cache.evict_token(&token);
    }

    (session::clear_session(&state.config), Json(json!({ "success": true })))
}

/// `GET /api/auth/check-session`: local cookie existence only, no upstream call.
pub async fn check_session(jar: CookieJar) -> Result<Json<Value>, ApiError> {
    session::session_token(&jar).ok_or(ApiError::NoSession)?;
    Ok(Json(json!({ "success": true, "data": { "hasSession": true } })))
}

/// `POST /api/auth/user_profile`: the only true session validation.
/// An upstream 401 removes the local cookie.
pub async fn user_profile(State(state): State<AppState>, Session { token }: Session) -> Response {
    match state
        .upstream
        .post_json("/user_profile", Some(&token), &json!({}), AUTH_TIMEOUT)
        .await
    {
        Ok(user) => Json(user).into_response(),
        Err(e) if e.status() == Some(401) => {
            tracing::warn!("upstream rejected session token; clearing cookie");
            state.terminated_cache.evict_token(&token);
            (session::clear_session(&state.config), ApiError::SessionInvalid).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "profile fetch failed");
            map_auth_failure(&e, ApiError::SessionInvalid).into_response()
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
