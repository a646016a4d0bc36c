//! Shared application state

use crate::settings::Settings;
use crate::store::{AppEvents, ConfigStore};

/// State shared by all request handlers
pub struct AppState {
    pub events: AppEvents,
    pub config: ConfigStore,
}

impl AppState {
    pub fn new(events: AppEvents, config: ConfigStore) -> Self {
        Self { events, config }
    }

    /// Stores for the files named by `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            AppEvents::from_settings(settings),
            ConfigStore::from_settings(settings),
        )
    }
}
