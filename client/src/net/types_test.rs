use super::*;

// =============================================================
// User
// =============================================================

#[test]
fn user_full_shape() {
    let user: User = serde_json::from_value(serde_json::json!({
        "success": true,
        "login": "alice",
        "name": "Alice",
        "nick": "al",
        "conn_type": "ldap",
        "role": "admin",
    }))
    .unwrap();
    assert!(user.success);
    assert_eq!(user.login, "alice");
    assert_eq!(user.role, "admin");
}

#[test]
fn user_missing_fields_default() {
    let user: User = serde_json::from_value(serde_json::json!({ "name": "Alice" })).unwrap();
    assert_eq!(user.name, "Alice");
    assert!(!user.success);
    assert!(user.login.is_empty());
}

#[test]
fn user_tolerates_numbers_and_nulls() {
    let user: User = serde_json::from_value(serde_json::json!({
        "success": 1,
        "role": 3,
        "nick": null,
    }))
    .unwrap();
    assert!(user.success);
    assert_eq!(user.role, "3");
    assert_eq!(user.nick, "");
}

// =============================================================
// Credentials
// =============================================================

#[test]
fn credentials_debug_redacts_password() {
    let creds = Credentials::new("alice", "secret");
    let shown = format!("{creds:?}");
    assert!(shown.contains("alice"));
    assert!(!shown.contains("secret"));
}

#[test]
fn credentials_serialize_both_fields() {
    let value = serde_json::to_value(Credentials::new("alice", "secret")).unwrap();
    assert_eq!(value, serde_json::json!({ "login": "alice", "password": "secret" }));
}

// =============================================================
// Responses
// =============================================================

#[test]
fn login_response_parses_token_and_user() {
    let resp: LoginResponse = serde_json::from_value(serde_json::json!({
        "success": true,
        "data": { "token": "tok123", "user": { "name": "Alice" } },
    }))
    .unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data.token, "tok123");
    assert_eq!(data.user.name, "Alice");
}

#[test]
fn session_check_reads_has_session() {
    let check: SessionCheck =
        serde_json::from_value(serde_json::json!({ "success": true, "data": { "hasSession": true } })).unwrap();
    assert!(check.has_session());
    assert!(!SessionCheck::default().has_session());
}

#[test]
fn error_body_prefers_message() {
    let body: ErrorBody =
        serde_json::from_value(serde_json::json!({ "statusMessage": "Fallback", "message": "Specific" })).unwrap();
    assert_eq!(body.into_message().as_deref(), Some("Specific"));

    let body: ErrorBody = serde_json::from_value(serde_json::json!({ "message": "", "statusMessage": "Fallback" })).unwrap();
    assert_eq!(body.into_message().as_deref(), Some("Fallback"));

    assert!(ErrorBody::default().into_message().is_none());
}
