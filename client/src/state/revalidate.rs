//! Periodic session revalidation.
//!
//! DESIGN
//! ======
//! The timer follows the store's authenticated predicate: it starts on
//! entering `Authenticated` and stops on leaving it. A 401 stops the timer
//! (the store has already cleared the user); any other failure is logged and
//! the timer keeps running. Dropping the handle stops the task.

#[cfg(test)]
#[path = "revalidate_test.rs"]
mod revalidate_test;

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::auth::AuthStore;

pub const REVALIDATION_INTERVAL: Duration = Duration::from_secs(5 * 60);

pub struct SessionRevalidator {
    task: JoinHandle<()>,
}

impl SessionRevalidator {
    #[must_use]
    pub fn spawn(store: AuthStore) -> Self {
        Self::spawn_with_period(store, REVALIDATION_INTERVAL)
    }

    #[must_use]
    pub fn spawn_with_period(store: AuthStore, period: Duration) -> Self {
        Self { task: tokio::spawn(run(store, period)) }
    }
}

impl Drop for SessionRevalidator {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(store: AuthStore, period: Duration) {
    let mut authenticated = store.subscribe();
    loop {
        if authenticated.wait_for(|on| *on).await.is_err() {
            return;
        }
        tracing::debug!(period_secs = period.as_secs(), "session revalidation started");

        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => match store.fetch_user().await {
                    Ok(_) | Err(super::auth::AuthError::Superseded) => {}
                    Err(e) if e.is_unauthorized() => {
                        tracing::info!("session revalidation stopped: session expired");
                        break;
                    }
                    Err(e) => tracing::warn!(error = %e, "session revalidation failed; will retry"),
                },
                changed = authenticated.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !*authenticated.borrow_and_update() {
                        tracing::debug!("session revalidation stopped: signed out");
                        break;
                    }
                }
            }
        }
    }
}
