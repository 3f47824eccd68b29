use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

use super::*;

/// `AppState` pointed at a wiremock upstream.
#[must_use]
pub fn test_app_state(server: &MockServer) -> AppState {
    test_app_state_with(GatewayConfig { api_base_url: Some(server.uri()), ..GatewayConfig::default() })
}

#[must_use]
pub fn test_app_state_with(config: GatewayConfig) -> AppState {
    AppState::new(config).expect("test upstream client")
}

/// `AppState` with no upstream base URL.
#[must_use]
pub fn unconfigured_app_state() -> AppState {
    test_app_state_with(GatewayConfig::default())
}

/// Captured response: status, headers and the body parsed as JSON (`Null` if not JSON).
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub raw: Vec<u8>,
    pub json: Value,
}

impl TestResponse {
    /// All `Set-Cookie` values.
    #[must_use]
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_owned)
            .collect()
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let raw = to_bytes(response.into_body(), usize::MAX).await.expect("body").to_vec();
    let json = serde_json::from_slice(&raw).unwrap_or(Value::Null);
    TestResponse { status, headers, raw, json }
}

/// JSON POST, optionally carrying a `sid` cookie.
#[must_use]
pub fn post_request(uri: &str, sid: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(sid) = sid {
        builder = builder.header("cookie", format!("sid={sid}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

#[must_use]
pub fn get_request(uri: &str, sid: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(sid) = sid {
        builder = builder.header("cookie", format!("sid={sid}"));
    }
    builder.body(Body::empty()).expect("request")
}
