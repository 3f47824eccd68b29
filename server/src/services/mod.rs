//! Gateway services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own upstream I/O, payload rules and session cookie
//! handling so route handlers stay focused on extraction and responses.

pub mod jobs;
pub mod session;
pub mod terminated_cache;
pub mod upstream;
