//! Application configuration document (`appConfig.json`)

use serde::{Deserialize, Serialize};

use super::wire::null_as_default;

/// User-facing app options. Every field is optional on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Dark theme
    #[serde(deserialize_with = "null_as_default")]
    pub dark_mode: bool,
}
