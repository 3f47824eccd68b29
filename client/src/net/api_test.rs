use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn api_for(server: &MockServer) -> HttpAuthApi {
    HttpAuthApi::new(&format!("{}/", server.uri())).unwrap()
}

#[test]
fn unauthorized_predicate() {
    assert!(ApiError::new(Some(401), "x").is_unauthorized());
    assert!(!ApiError::new(Some(500), "x").is_unauthorized());
    assert!(!ApiError::new(None, "x").is_unauthorized());
}

#[tokio::test]
async fn login_then_profile_reuses_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "login": "alice", "password": "secret" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "sid=tok123; Path=/")
                .set_body_json(json!({ "success": true, "data": { "token": "tok123", "user": { "name": "Alice" } } })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/user_profile"))
        .and(header("cookie", "sid=tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Alice", "role": "admin" })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let login = api.login(&Credentials::new("alice", "secret")).await.unwrap();
    assert_eq!(login.data.unwrap().token, "tok123");

    let user = api.fetch_profile().await.unwrap();
    assert_eq!(user.role, "admin");
}

#[tokio::test]
async fn gateway_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "statusMessage": "Authentication failed",
            "message": "Authentication failed",
        })))
        .mount(&server)
        .await;

    let err = api_for(&server).login(&Credentials::new("alice", "nope")).await.unwrap_err();
    assert_eq!(err, ApiError::new(Some(401), "Authentication failed"));
}

#[tokio::test]
async fn error_without_body_has_empty_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/user_profile"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = api_for(&server).fetch_profile().await.unwrap_err();
    assert_eq!(err.status, Some(502));
    assert!(err.message.is_empty());
}

#[tokio::test]
async fn check_session_maps_401_to_false() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/check-session"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "No valid session" })))
        .mount(&server)
        .await;

    assert!(!api_for(&server).check_session().await.unwrap());
}

#[tokio::test]
async fn check_session_reads_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/check-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": { "hasSession": true } })))
        .mount(&server)
        .await;

    assert!(api_for(&server).check_session().await.unwrap());
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    let api = HttpAuthApi::new("http://127.0.0.1:1").unwrap();
    let err = api.logout().await.unwrap_err();
    assert!(err.status.is_none());
    assert!(!err.message.is_empty());
}
