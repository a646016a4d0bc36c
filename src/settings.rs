//! Process settings
//!
//! Where the documents live and where the HTTP API listens. Resolved from
//! the environment once at startup:
//!
//! - `EVENT_LIST_DATA_DIR`: data directory (relative paths are resolved
//!   against the current directory). Defaults to `<config dir>/event-list`.
//! - `EVENT_LIST_ADDR`: bind address, default `127.0.0.1:3030`.

use std::env;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
pub const APP_ID: &str = "event-list";

pub const EVENTS_FILE_NAME: &str = "events.json";
pub const CONFIG_FILE_NAME: &str = "appConfig.json";

pub const DATA_DIR_ENV: &str = "EVENT_LIST_DATA_DIR";
pub const ADDR_ENV: &str = "EVENT_LIST_ADDR";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3030";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding `events.json` and `appConfig.json`
    pub data_dir: PathBuf,
    /// Address the HTTP API binds to
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bind_addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl Settings {
    /// Settings with a custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = match lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(dir) => {
                let dir = PathBuf::from(dir);
                if dir.is_absolute() {
                    dir
                } else {
                    env::current_dir()
                        .unwrap_or_else(|_| PathBuf::from("."))
                        .join(dir)
                }
            }
            None => default_data_dir(),
        };

        let bind_addr = lookup(ADDR_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        Self { data_dir, bind_addr }
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to events.json
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(EVENTS_FILE_NAME)
    }

    /// Get path to appConfig.json
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_ID))
        .unwrap_or_else(|| PathBuf::from(APP_ID))
}
