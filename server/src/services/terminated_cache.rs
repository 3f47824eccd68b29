//! Short-lived read cache for terminated-job listings.
//!
//! DESIGN
//! ======
//! Entries are keyed by `(session token, serialized payload)` so one session
//! never sees another's listing. A zero TTL disables the cache entirely and
//! every lookup misses. Logout evicts every entry for the departing token.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::Value;

type CacheKey = (String, String);

#[derive(Clone)]
pub struct TerminatedCache {
    inner: Arc<Mutex<HashMap<CacheKey, (Instant, Value)>>>,
    ttl: Duration,
}

impl TerminatedCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), ttl }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    #[must_use]
    pub fn get(&self, token: &str, payload: &Value) -> Option<Value> {
        self.get_at(token, payload, Instant::now())
    }

    pub fn insert(&self, token: &str, payload: &Value, response: Value) {
        self.insert_at(token, payload, response, Instant::now());
    }

    /// Drop every entry belonging to `token`.
    pub fn evict_token(&self, token: &str) {
        if let Ok(mut map) = self.inner.lock() {
            map.retain(|(owner, _), _| owner != token);
        }
    }

    fn get_at(&self, token: &str, payload: &Value, now: Instant) -> Option<Value> {
        if !self.is_enabled() {
            return None;
        }
        let key = (token.to_owned(), payload.to_string());
        let mut map = self.inner.lock().ok()?;
        match map.get(&key) {
            Some((stored, value)) if now.duration_since(*stored) < self.ttl => Some(value.clone()),
            Some(_) => {
                map.remove(&key);
                None
            }
            None => None,
        }
    }

    fn insert_at(&self, token: &str, payload: &Value, response: Value, now: Instant) {
        if !self.is_enabled() {
            return;
        }
        let Ok(mut map) = self.inner.lock() else { return };
        // Sweep expired entries on write so the map stays bounded by live sessions.
        map.retain(|_, (stored, _)| now.duration_since(*stored) < self.ttl);
        map.insert((token.to_owned(), payload.to_string()), (now, response));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().map(|m| m.len()).unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "terminated_cache_test.rs"]
mod tests;
