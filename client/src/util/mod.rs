//! Navigation helpers shared by the route guard and the auth store.

pub mod auth;
