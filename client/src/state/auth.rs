//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the route guard and the revalidation timer. The store is the only
//! writer of `AuthState`; everything else reads snapshots or subscribes to the
//! authenticated predicate.
//!
//! DESIGN
//! ======
//! States are derived, not stored: `Uninitialized` (no user, not initialized),
//! `Authenticated` (user present), `Unauthenticated` (no user, initialized).
//! Every action records the session epoch before its network call and
//! `logout` bumps it, so a response that lands after a logout is discarded
//! instead of resurrecting the session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::net::api::{ApiError, AuthApi};
use crate::net::types::{Credentials, User};
use crate::util::auth::{LOGIN_PATH, Navigator, login_redirect, path_of};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_initialized: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// The persisted slice of `AuthState`: only the user survives a reload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Gateway answered 2xx with an unusable body.
    #[error("{0}")]
    InvalidResponse(String),

    /// A logout happened while the call was in flight; its result was dropped.
    #[error("session ended while request was in flight")]
    Superseded,
}

impl AuthError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

// =============================================================================
// STORE
// =============================================================================

struct Shared {
    state: AuthState,
    /// In-flight actions; `state.loading` mirrors `in_flight > 0`.
    in_flight: usize,
}

struct Inner {
    api: Arc<dyn AuthApi>,
    navigator: Arc<dyn Navigator>,
    shared: Mutex<Shared>,
    authenticated: watch::Sender<bool>,
    init_lock: tokio::sync::Mutex<()>,
    login_lock: tokio::sync::Mutex<()>,
    epoch: AtomicU64,
}

/// Shared handle to one session's auth store. Clones share state.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<Inner>,
}

/// Clears one unit of `loading` on drop, whatever path the action exits by.
struct LoadingGuard<'a> {
    store: &'a AuthStore,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut shared = self.store.lock();
        shared.in_flight = shared.in_flight.saturating_sub(1);
        shared.state.loading = shared.in_flight > 0;
    }
}

impl AuthStore {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, navigator: Arc<dyn Navigator>) -> Self {
        Self::restore(api, navigator, PersistedAuth::default())
    }

    /// Rebuild a store from persisted state. The restored user still needs
    /// revalidation, so the store starts uninitialized.
    #[must_use]
    pub fn restore(api: Arc<dyn AuthApi>, navigator: Arc<dyn Navigator>, persisted: PersistedAuth) -> Self {
        let authenticated = persisted.user.is_some();
        let state = AuthState { user: persisted.user, ..AuthState::default() };
        let (tx, _rx) = watch::channel(authenticated);
        Self {
            inner: Arc::new(Inner {
                api,
                navigator,
                shared: Mutex::new(Shared { state, in_flight: 0 }),
                authenticated: tx,
                init_lock: tokio::sync::Mutex::new(()),
                login_lock: tokio::sync::Mutex::new(()),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    // ===== GETTERS =====

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().state.is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().state.loading
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.lock().state.is_initialized
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.lock().state.user.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().state.error.clone()
    }

    #[must_use]
    pub fn persisted(&self) -> PersistedAuth {
        PersistedAuth { user: self.current_user() }
    }

    /// Watch the authenticated predicate. Only transitions are published.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.authenticated.subscribe()
    }

    // ===== ACTIONS =====

    pub fn clear_error(&self) {
        self.update(|s| s.error = None);
    }

    /// Log in and load the user in one round trip.
    ///
    /// Logins are serialized per store. On failure the message is recorded in
    /// `error` and the error is returned as well.
    ///
    /// # Errors
    ///
    /// Returns the gateway error, [`AuthError::InvalidResponse`] for a 2xx
    /// without user data, or [`AuthError::Superseded`] if a logout raced it.
    pub async fn login(&self, credentials: Credentials) -> Result<User, AuthError> {
        let _serial = self.inner.login_lock.lock().await;
        let epoch = self.epoch();
        let _loading = self.begin_loading();
        self.update(|s| s.error = None);

        let result = self.inner.api.login(&credentials).await;
        if self.epoch() != epoch {
            return Err(AuthError::Superseded);
        }

        match result {
            Ok(response) => match response.data {
                Some(data) if response.success => {
                    let user = data.user;
                    self.update(|s| {
                        s.user = Some(user.clone());
                        s.is_initialized = true;
                    });
                    tracing::info!(login = %credentials.login, "login succeeded");
                    Ok(user)
                }
                _ => {
                    self.update(|s| s.error = Some(LOGIN_FAILED_MESSAGE.to_owned()));
                    Err(AuthError::InvalidResponse(LOGIN_FAILED_MESSAGE.to_owned()))
                }
            },
            Err(e) => {
                let message = if e.message.trim().is_empty() {
                    LOGIN_FAILED_MESSAGE.to_owned()
                } else {
                    e.message.clone()
                };
                tracing::warn!(status = ?e.status, error = %message, "login failed");
                self.update(|s| s.error = Some(message));
                Err(e.into())
            }
        }
    }

    /// Log out. Always ends unauthenticated and uninitialized, then navigates
    /// to the login page, even if the gateway call fails.
    pub async fn logout(&self) {
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        {
            let _loading = self.begin_loading();
            if let Err(e) = self.inner.api.logout().await {
                tracing::warn!(error = %e, "logout request failed; clearing local state anyway");
            }
            self.update(|s| {
                s.user = None;
                s.error = None;
                s.is_initialized = false;
            });
        }
        self.inner.navigator.navigate(LOGIN_PATH);
    }

    /// Revalidate the session against the gateway.
    ///
    /// A 401 clears the user, marks the store initialized and redirects to
    /// the login page carrying the current location, unless already there.
    ///
    /// # Errors
    ///
    /// Returns the gateway error or [`AuthError::Superseded`].
    pub async fn fetch_user(&self) -> Result<User, AuthError> {
        self.fetch_user_with(true).await
    }

    async fn fetch_user_with(&self, redirect_on_expiry: bool) -> Result<User, AuthError> {
        let epoch = self.epoch();
        let _loading = self.begin_loading();

        let result = self.inner.api.fetch_profile().await;
        if self.epoch() != epoch {
            return Err(AuthError::Superseded);
        }

        match result {
            Ok(user) => {
                self.update(|s| {
                    s.user = Some(user.clone());
                    s.error = None;
                });
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("session expired; please log in again");
                self.update(|s| {
                    s.user = None;
                    s.is_initialized = true;
                });
                if redirect_on_expiry {
                    self.redirect_to_login();
                }
                Err(e.into())
            }
            Err(e) => {
                self.update(|s| s.error = Some(e.message.clone()));
                Err(e.into())
            }
        }
    }

    /// Establish the session state once.
    ///
    /// Concurrent calls are serialized and collapse on the `is_initialized`
    /// re-check, so at most one check-session and one profile fetch happen.
    /// A restored user rejected with 401 is redirected to the login page;
    /// without a user the caller decides where to go.
    pub async fn initialize_auth(&self) {
        self.initialize(false).await;
    }

    /// Run initialization without blocking the caller. Expiry found here
    /// redirects through `fetch_user`'s side effect.
    pub fn spawn_initialize(&self) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move { store.initialize(true).await })
    }

    async fn initialize(&self, redirect_on_expiry: bool) {
        if self.is_initialized() {
            return;
        }
        let _serial = self.inner.init_lock.lock().await;
        if self.is_initialized() {
            return;
        }

        let epoch = self.epoch();
        let restored = self.current_user().is_some();
        if !restored {
            let has_session = match self.inner.api.check_session().await {
                Ok(has_session) => has_session,
                Err(e) => {
                    tracing::warn!(error = %e, "session check failed; treating as signed out");
                    false
                }
            };
            if self.epoch() != epoch {
                return;
            }
            if !has_session {
                self.update(|s| {
                    s.user = None;
                    s.is_initialized = true;
                });
                return;
            }
        }

        match self.fetch_user_with(restored || redirect_on_expiry).await {
            Ok(_) => self.update(|s| s.is_initialized = true),
            Err(AuthError::Superseded) => {}
            Err(e) => {
                tracing::warn!(error = %e, "session revalidation failed during initialization");
                self.update(|s| {
                    s.user = None;
                    s.is_initialized = true;
                });
            }
        }
    }

    // ===== INTERNALS =====

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.inner.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }

    /// Apply a mutation and publish the authenticated predicate if it changed.
    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        let authenticated = {
            let mut shared = self.lock();
            f(&mut shared.state);
            shared.state.is_authenticated()
        };
        self.inner.authenticated.send_if_modified(|current| {
            let changed = *current != authenticated;
            *current = authenticated;
            changed
        });
    }

    fn begin_loading(&self) -> LoadingGuard<'_> {
        let mut shared = self.lock();
        shared.in_flight += 1;
        shared.state.loading = true;
        LoadingGuard { store: self }
    }

    fn redirect_to_login(&self) {
        let current = self.inner.navigator.current_path();
        if path_of(&current) == LOGIN_PATH {
            return;
        }
        self.inner.navigator.navigate(&login_redirect(&current));
    }
}
