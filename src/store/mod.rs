//! Stores backed by JSON documents
//!
//! - `AppEvents`: the event store facade (lazy hydration, update-or-create,
//!   rollback-by-reload)
//! - `ConfigStore`: the app configuration document
//! - `IdGenerator`: unique, timestamp-derived event ids

mod config;
mod events;
mod ids;

pub use config::ConfigStore;
pub use events::AppEvents;
pub use ids::IdGenerator;
