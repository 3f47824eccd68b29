//! Networking modules for the gateway's auth endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the HTTP calls behind the `AuthApi` seam and `types`
//! defines the wire schema.

pub mod api;
pub mod types;
