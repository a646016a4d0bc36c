//! App configuration store (`appConfig.json`)

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::info;

use crate::persistence::{decode_config, JsonFile, StoreResult};
use crate::settings::Settings;
use crate::types::AppConfig;

/// Loads and saves the app configuration through the same gateway as events.
///
/// A missing file means default configuration. The cached value is only
/// replaced after a successful read or write.
pub struct ConfigStore {
    file: JsonFile,
    cached: RwLock<Option<AppConfig>>,
    writer: Mutex<()>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
            cached: RwLock::new(None),
            writer: Mutex::new(()),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.config_path())
    }

    /// Get the config file path
    pub fn file_path(&self) -> &Path {
        self.file.path()
    }

    /// Cached configuration, or the default if nothing was loaded yet (no I/O)
    pub fn current(&self) -> AppConfig {
        (*self.cached.read()).unwrap_or_default()
    }

    /// Configuration, reading the file on first use
    pub async fn get(&self) -> StoreResult<AppConfig> {
        let cached = *self.cached.read();
        match cached {
            Some(config) => Ok(config),
            None => self.reload().await,
        }
    }

    /// Re-read the file
    pub async fn reload(&self) -> StoreResult<AppConfig> {
        let _guard = self.writer.lock().await;
        let config = self.file.load(decode_config).await?.unwrap_or_default();
        *self.cached.write() = Some(config);
        Ok(config)
    }

    /// Save `config`, fully replacing the file
    pub async fn update(&self, config: AppConfig) -> StoreResult<AppConfig> {
        let _guard = self.writer.lock().await;
        self.file.save(&config).await?;
        *self.cached.write() = Some(config);
        info!(dark_mode = config.dark_mode, "Configuration saved");
        Ok(config)
    }

    /// Toggle dark mode on or off
    pub async fn set_dark_mode(&self, dark_mode: bool) -> StoreResult<AppConfig> {
        let mut config = self.current();
        config.dark_mode = dark_mode;
        self.update(config).await
    }
}
