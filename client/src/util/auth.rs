//! Route guard and shared auth navigation helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation passes through `guard_navigation`, so redirects to and
//! from the login page follow one set of rules. `decide` is the pure part;
//! the async driver only adds initialization and the server-pass skip.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::{AuthState, AuthStore};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const PUBLIC_ROUTES: [&str; 2] = [LOGIN_PATH, "/forgot-password"];

/// Navigation seam implemented by the UI shell.
pub trait Navigator: Send + Sync {
    /// Current location as path plus query, e.g. `/pending?page=2`.
    fn current_path(&self) -> String;

    fn navigate(&self, to: &str);
}

/// Path component of a `path?query` string.
#[must_use]
pub fn path_of(full_path: &str) -> &str {
    full_path.split_once('?').map_or(full_path, |(path, _)| path)
}

#[must_use]
pub fn is_public_route(full_path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path_of(full_path))
}

/// Login URL that returns to `full_path` afterwards. The query is omitted
/// when the target path is `/`.
#[must_use]
pub fn login_redirect(full_path: &str) -> String {
    if full_path.is_empty() || path_of(full_path) == HOME_PATH {
        return LOGIN_PATH.to_owned();
    }
    format!("{LOGIN_PATH}?redirect={}", urlencoding::encode(full_path))
}

/// Decoded `redirect` query value, if it is a local absolute path.
#[must_use]
pub fn redirect_target(full_path: &str) -> Option<String> {
    let (_, query) = full_path.split_once('?')?;
    let raw = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == "redirect").then_some(value))?;
    let decoded = urlencoding::decode(&raw.replace('+', " ")).ok()?.into_owned();
    (decoded.starts_with('/') && !decoded.starts_with("//") && !decoded.starts_with("/\\")).then_some(decoded)
}

// =============================================================================
// DECISION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
    /// No user and a protected target: initialize first, then decide again.
    AwaitInit,
    /// User present but not yet revalidated this session: go, and revalidate
    /// in the background.
    ProceedAndRevalidate,
}

/// Pure guard decision over the store state and the target `path?query`.
#[must_use]
pub fn decide(state: &AuthState, target: &str) -> GuardDecision {
    let public = is_public_route(target);
    match (&state.user, public) {
        (Some(_), true) => GuardDecision::Redirect(redirect_target(target).unwrap_or_else(|| HOME_PATH.to_owned())),
        (None, false) if !state.is_initialized => GuardDecision::AwaitInit,
        (None, false) => GuardDecision::Redirect(login_redirect(target)),
        (Some(_), false) if !state.is_initialized => GuardDecision::ProceedAndRevalidate,
        _ => GuardDecision::Proceed,
    }
}

// =============================================================================
// DRIVER
// =============================================================================

/// Where the guard is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPass {
    /// Server-rendered pass: no live cookie, no navigation. The guard is skipped.
    Server,
    Client,
}

/// Final outcome of one guarded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(String),
}

/// Run the guard for a navigation to `target`.
pub async fn guard_navigation(store: &AuthStore, target: &str, pass: RenderPass) -> Navigation {
    if pass == RenderPass::Server {
        return Navigation::Proceed;
    }

    match decide(&store.snapshot(), target) {
        GuardDecision::Proceed => Navigation::Proceed,
        GuardDecision::Redirect(to) => Navigation::Redirect(to),
        GuardDecision::ProceedAndRevalidate => {
            drop(store.spawn_initialize());
            Navigation::Proceed
        }
        GuardDecision::AwaitInit => {
            store.initialize_auth().await;
            match decide(&store.snapshot(), target) {
                GuardDecision::Proceed | GuardDecision::ProceedAndRevalidate => Navigation::Proceed,
                GuardDecision::Redirect(to) => Navigation::Redirect(to),
                // Initialization was cut short by a logout.
                GuardDecision::AwaitInit => Navigation::Redirect(login_redirect(target)),
            }
        }
    }
}
