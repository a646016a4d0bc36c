//! HTTP API
//!
//! A thin REST surface over [`AppEvents`](crate::store::AppEvents) and
//! [`ConfigStore`](crate::store::ConfigStore) for the desktop front-end.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
