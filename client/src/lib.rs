//! Browser-side auth session for the job dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The UI shell owns rendering and routing. This crate owns the session:
//! `net` talks to the gateway's `/api/auth/*` endpoints, `state` holds the
//! auth store and the revalidation timer, and `util` carries the route guard.

pub mod net;
pub mod state;
pub mod util;

#[cfg(test)]
#[path = "test_helpers_test.rs"]
pub(crate) mod test_helpers;
