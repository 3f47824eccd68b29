//! Client session state.

pub mod auth;
pub mod revalidate;
