//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Clone is required by Axum; every field is cheap to clone.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::services::terminated_cache::TerminatedCache;
use crate::services::upstream::{UpstreamClient, UpstreamError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: UpstreamClient,
    pub terminated_cache: TerminatedCache,
}

impl AppState {
    /// Build state from config.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::ClientBuild`] if the HTTP client cannot be created.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config)?;
        let terminated_cache = TerminatedCache::new(config.terminated_cache_ttl);
        Ok(Self { config: Arc::new(config), upstream, terminated_cache })
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;
