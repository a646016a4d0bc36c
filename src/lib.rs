//! Event List
//!
//! Storage core of a small desktop to-do application: an ordered list of
//! events kept in memory and mirrored to a JSON file, plus the app's
//! configuration document, exposed to the front-end over a local REST API.
//!
//! # Features
//!
//! - **Lazy hydration**: the file is read on first access and served from memory afterwards
//! - **Update-or-create**: updates keep the record's position, creates append
//! - **Rollback-by-reload**: a failed save reloads the last good state from disk
//! - **Corruption backup**: unparseable files are copied to `<file>.<millis>.bak`
//! - **Atomic saves**: temp file + fsync + rename
//!
//! # Modules
//!
//! - `types`: Event model, wire form, app configuration
//! - `collection`: Arena-backed ordered list and id index
//! - `persistence`: JSON document gateway and error taxonomy
//! - `store`: `AppEvents` facade and `ConfigStore`
//! - `settings`: Data directory and bind address
//! - `api`: Axum REST endpoints
//! - `utils`: Atomic writes, timestamps
//!
//! # Example
//!
//! ```no_run
//! use event_list::{AppEvents, EventPatch};
//!
//! # async fn run() -> Result<(), event_list::StoreError> {
//! let events = AppEvents::new("/tmp/event-list/events.json");
//! let saved = events.update_or_create(None, EventPatch::new("Water the plants")).await?;
//! assert!(saved);
//! for event in events.get(false).await? {
//!     println!("{} {}", event.id, event.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod collection;
pub mod persistence;
pub mod settings;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use persistence::{ErrorCode, FileKind, StoreError, StoreResult};
pub use settings::Settings;
pub use store::{AppEvents, ConfigStore};
pub use types::{AppConfig, Event, EventId, EventPatch, WireEvent};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
