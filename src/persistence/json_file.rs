//! JSON document gateway
//!
//! One `JsonFile` owns one document path. Loading distinguishes three
//! outcomes: the file is missing (normal on first run), the file parses into
//! the expected shape, or the file is corrupted. A corrupted file is copied
//! verbatim to `<file>.<epoch-millis>.bak` next to the original before the
//! parse error is returned, and is never repaired in place.
//!
//! Saving ensures the directory exists, then replaces the whole document
//! through [`atomic_write`].

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, error, warn};

use super::error::{StoreError, StoreResult};
use crate::utils::{atomic_write, cleanup_temp_file, current_timestamp_millis};

/// A JSON document at a fixed path
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the document path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path a corrupted copy is written to at time `millis`
    pub fn backup_path(&self, millis: i64) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("document"));
        name.push(format!(".{}.bak", millis));
        self.path.with_file_name(name)
    }

    /// Read and decode the document.
    ///
    /// Returns `Ok(None)` when the file does not exist. `decode` checks the
    /// top-level shape; if it (or JSON parsing) fails the raw content is
    /// backed up and [`StoreError::Parse`] is returned.
    pub async fn load<T, F>(&self, decode: F) -> StoreResult<Option<T>>
    where
        F: FnOnce(Value) -> Result<T, String>,
    {
        match cleanup_temp_file(&self.path).await {
            Ok(true) => warn!(path = %self.path.display(), "Removed stale temp file from an interrupted save"),
            Ok(false) => {}
            Err(e) => debug!(path = %self.path.display(), error = %e, "Could not check for stale temp file"),
        }

        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No file yet");
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let text = match std::str::from_utf8(&raw) {
            Ok(text) => text,
            Err(e) => return Err(self.corrupted(&raw, format!("invalid UTF-8: {}", e)).await),
        };

        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => return Err(self.corrupted(&raw, format!("invalid JSON: {}", e)).await),
        };

        match decode(value) {
            Ok(document) => Ok(Some(document)),
            Err(reason) => Err(self.corrupted(&raw, reason).await),
        }
    }

    /// Serialize `document` and replace the file with it
    pub async fn save<T>(&self, document: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let content = serde_json::to_vec(document)?;
        write_document(&self.path, &content).await?;
        debug!(path = %self.path.display(), bytes = content.len(), "Saved document");
        Ok(())
    }

    /// Back up the raw content and build the parse error.
    ///
    /// A failed backup is logged and does not replace the parse error.
    async fn corrupted(&self, raw: &[u8], reason: String) -> StoreError {
        let backup_path = self.backup_path(current_timestamp_millis());
        let backup = match write_document(&backup_path, raw).await {
            Ok(()) => {
                warn!(
                    path = %self.path.display(),
                    backup = %backup_path.display(),
                    %reason,
                    "Document is corrupted, raw content backed up"
                );
                Some(backup_path)
            }
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %e,
                    %reason,
                    "Document is corrupted and the backup failed"
                );
                None
            }
        };

        StoreError::Parse {
            path: self.path.clone(),
            reason,
            backup,
        }
    }
}

/// Create the parent directory (idempotent) and atomically write `content`
async fn write_document(path: &Path, content: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Directory {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    atomic_write(path, content)
        .await
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}
