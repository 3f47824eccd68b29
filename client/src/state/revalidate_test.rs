use std::time::Duration;

use super::*;
use crate::net::api::ApiError;
use crate::net::types::Credentials;
use crate::test_helpers::{FakeApi, alice, store_with, unauthorized};

const PERIOD: Duration = Duration::from_secs(10);

async fn elapse(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

fn creds() -> Credentials {
    Credentials::new("alice", "secret")
}

#[test]
fn default_interval_is_five_minutes() {
    assert_eq!(REVALIDATION_INTERVAL, Duration::from_secs(300));
}

#[tokio::test(start_paused = true)]
async fn ticks_while_authenticated() {
    let (store, api, _) = store_with(FakeApi::new(), "/pending");
    store.login(creds()).await.unwrap();
    let _timer = SessionRevalidator::spawn_with_period(store.clone(), PERIOD);

    elapse(35).await;

    assert_eq!(api.profile_calls(), 3);
    assert_eq!(store.current_user(), Some(alice()));
}

#[tokio::test(start_paused = true)]
async fn idle_until_authenticated() {
    let (store, api, _) = store_with(FakeApi::new(), "/login");
    let _timer = SessionRevalidator::spawn_with_period(store.clone(), PERIOD);

    elapse(60).await;
    assert_eq!(api.profile_calls(), 0);

    store.login(creds()).await.unwrap();
    elapse(5).await;
    assert_eq!(api.profile_calls(), 0);
    elapse(6).await;
    assert_eq!(api.profile_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn unauthorized_stops_timer() {
    let (store, api, nav) = store_with(FakeApi::new(), "/pending");
    store.login(creds()).await.unwrap();
    api.set_profile(Err(unauthorized()));
    let _timer = SessionRevalidator::spawn_with_period(store.clone(), PERIOD);

    elapse(11).await;
    assert_eq!(api.profile_calls(), 1);
    assert!(!store.is_authenticated());
    assert_eq!(nav.visits(), vec!["/login?redirect=%2Fpending".to_owned()]);

    elapse(60).await;
    assert_eq!(api.profile_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn logout_stops_timer() {
    let (store, api, _) = store_with(FakeApi::new(), "/pending");
    store.login(creds()).await.unwrap();
    let _timer = SessionRevalidator::spawn_with_period(store.clone(), PERIOD);

    elapse(11).await;
    assert_eq!(api.profile_calls(), 1);

    store.logout().await;
    elapse(60).await;
    assert_eq!(api.profile_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn transient_failures_keep_timer_running() {
    let (store, api, nav) = store_with(FakeApi::new(), "/pending");
    store.login(creds()).await.unwrap();
    api.set_profile(Err(ApiError::new(Some(503), "Service temporarily unavailable")));
    let _timer = SessionRevalidator::spawn_with_period(store.clone(), PERIOD);

    elapse(31).await;

    assert_eq!(api.profile_calls(), 3);
    assert_eq!(store.current_user(), Some(alice()));
    assert!(nav.visits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn restarts_after_logging_in_again() {
    let (store, api, _) = store_with(FakeApi::new(), "/pending");
    let _timer = SessionRevalidator::spawn_with_period(store.clone(), PERIOD);

    store.login(creds()).await.unwrap();
    elapse(11).await;
    store.logout().await;
    elapse(30).await;
    assert_eq!(api.profile_calls(), 1);

    store.login(creds()).await.unwrap();
    elapse(11).await;
    assert_eq!(api.profile_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_stops_timer() {
    let (store, api, _) = store_with(FakeApi::new(), "/pending");
    store.login(creds()).await.unwrap();
    let timer = SessionRevalidator::spawn_with_period(store.clone(), PERIOD);

    drop(timer);
    elapse(60).await;

    assert_eq!(api.profile_calls(), 0);
}
