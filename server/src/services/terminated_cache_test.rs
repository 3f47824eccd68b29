use serde_json::json;

use super::*;

const TTL: Duration = Duration::from_secs(30);

#[test]
fn zero_ttl_never_caches() {
    let cache = TerminatedCache::new(Duration::ZERO);
    let payload = json!({ "from": 0, "size": 10 });
    cache.insert("tok", &payload, json!({ "data": [] }));
    assert!(!cache.is_enabled());
    assert!(cache.get("tok", &payload).is_none());
    assert_eq!(cache.len(), 0);
}

#[test]
fn hit_within_ttl() {
    let cache = TerminatedCache::new(TTL);
    let payload = json!({ "from": 0, "size": 10 });
    let now = Instant::now();
    cache.insert_at("tok", &payload, json!({ "data": [1] }), now);
    assert_eq!(
        cache.get_at("tok", &payload, now + Duration::from_secs(29)),
        Some(json!({ "data": [1] }))
    );
}

#[test]
fn expired_entry_misses_and_is_dropped() {
    let cache = TerminatedCache::new(TTL);
    let payload = json!({});
    let now = Instant::now();
    cache.insert_at("tok", &payload, json!({}), now);
    assert!(cache.get_at("tok", &payload, now + TTL).is_none());
    assert_eq!(cache.len(), 0);
}

#[test]
fn entries_are_scoped_by_token_and_payload() {
    let cache = TerminatedCache::new(TTL);
    let now = Instant::now();
    cache.insert_at("alice", &json!({ "from": 0 }), json!("a0"), now);

    assert!(cache.get_at("bob", &json!({ "from": 0 }), now).is_none());
    assert!(cache.get_at("alice", &json!({ "from": 10 }), now).is_none());
    assert_eq!(cache.get_at("alice", &json!({ "from": 0 }), now), Some(json!("a0")));
}

#[test]
fn evict_token_removes_only_that_session() {
    let cache = TerminatedCache::new(TTL);
    let now = Instant::now();
    cache.insert_at("alice", &json!({ "from": 0 }), json!(1), now);
    cache.insert_at("alice", &json!({ "from": 10 }), json!(2), now);
    cache.insert_at("bob", &json!({ "from": 0 }), json!(3), now);

    cache.evict_token("alice");

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get_at("bob", &json!({ "from": 0 }), now), Some(json!(3)));
}

#[test]
fn insert_sweeps_expired_entries() {
    let cache = TerminatedCache::new(TTL);
    let start = Instant::now();
    cache.insert_at("old", &json!({}), json!(1), start);
    cache.insert_at("new", &json!({}), json!(2), start + TTL + Duration::from_secs(1));
    assert_eq!(cache.len(), 1);
}
