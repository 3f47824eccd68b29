use std::time::Duration;

use super::*;

#[test]
fn unconfigured_state_builds() {
    let state = AppState::new(GatewayConfig::default()).unwrap();
    assert!(!state.upstream.is_configured());
    assert!(!state.terminated_cache.is_enabled());
}

#[test]
fn cache_follows_configured_ttl() {
    let config = GatewayConfig {
        api_base_url: Some("http://upstream.test".into()),
        terminated_cache_ttl: Duration::from_secs(30),
        ..GatewayConfig::default()
    };
    let state = AppState::new(config).unwrap();
    assert!(state.upstream.is_configured());
    assert!(state.terminated_cache.is_enabled());
    assert_eq!(state.config.terminated_cache_ttl, Duration::from_secs(30));
}

#[test]
fn clones_share_the_cache() {
    let config = GatewayConfig { terminated_cache_ttl: Duration::from_secs(30), ..GatewayConfig::default() };
    let state = AppState::new(config).unwrap();
    let other = state.clone();
    let payload = serde_json::json!({ "from": 0 });
    state.terminated_cache.insert("tok", &payload, serde_json::json!([1]));
    assert_eq!(other.terminated_cache.get("tok", &payload), Some(serde_json::json!([1])));
}
