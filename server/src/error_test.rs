use super::*;

#[test]
fn taxonomy_status_codes() {
    let cases = [
        (ApiError::Configuration, 500),
        (ApiError::AuthenticationRequired(AUTH_REQUIRED_MESSAGE.into()), 401),
        (ApiError::AuthenticationFailed("x".into()), 401),
        (ApiError::NoSession, 401),
        (ApiError::SessionInvalid, 401),
        (ApiError::SessionExpired(SESSION_EXPIRED_MESSAGE.into()), 401),
        (ApiError::InvalidRequest("x".into()), 400),
        (ApiError::MethodNotAllowed("POST"), 405),
        (ApiError::Forbidden("x".into()), 403),
        (ApiError::NotFound("x".into()), 404),
        (ApiError::Conflict("x".into()), 409),
        (ApiError::ValidationFailed("x".into()), 422),
        (ApiError::RateLimited("x".into()), 429),
        (ApiError::RequestTimeout("x".into()), 408),
        (ApiError::ServiceUnavailable { status: 503, message: "x".into() }, 503),
        (ApiError::ServiceUnavailable { status: 500, message: "x".into() }, 500),
        (ApiError::Upstream { status: 418, message: "x".into() }, 418),
        (ApiError::Internal("x".into()), 500),
    ];
    for (err, expected) in cases {
        assert_eq!(err.status().as_u16(), expected, "{err:?}");
    }
}

#[test]
fn invalid_upstream_status_falls_back_to_bad_gateway() {
    let err = ApiError::Upstream { status: 42, message: "odd".into() };
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn unauthorized_predicate() {
    assert!(ApiError::SessionInvalid.is_unauthorized());
    assert!(ApiError::NoSession.is_unauthorized());
    assert!(!ApiError::Forbidden("nope".into()).is_unauthorized());
}

#[tokio::test]
async fn into_response_renders_json_body() {
    let response = ApiError::InvalidRequest("Invalid UUID format: abc".into()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["statusMessage"], "Invalid UUID format: abc");
    assert_eq!(body["message"], "Invalid UUID format: abc");
}
