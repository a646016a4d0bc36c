//! Atomic file operations
//!
//! Whole-document saves go through here so a crash mid-write never leaves
//! a half-written JSON file behind.
//!
//! # Pattern
//!
//! 1. Write to a sibling temporary file (`<name>.tmp`)
//! 2. Call sync_all() to flush to disk
//! 3. Rename temp file to final path (atomic on most filesystems)
//!
//! The final file is therefore either the old version or the new version,
//! never a partial one.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Path of the temporary file used while replacing `path`.
///
/// The suffix is appended rather than substituted, so `events.json`
/// becomes `events.json.tmp`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("unnamed"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Atomically replace the content of `path`.
///
/// The parent directory must already exist; creating it is left to the
/// caller so that directory failures can be reported separately.
pub async fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let temp_path = temp_path_for(path);

    let mut file = File::create(&temp_path).await?;
    if let Err(e) = write_and_sync(&mut file, content).await {
        drop(file);
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }
    drop(file);

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e);
    }

    Ok(())
}

async fn write_and_sync(file: &mut File, content: &[u8]) -> io::Result<()> {
    file.write_all(content).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Remove a temp file left behind by an interrupted [`atomic_write`].
///
/// Returns `true` if a stale file was found and removed.
pub async fn cleanup_temp_file(path: &Path) -> io::Result<bool> {
    let temp_path = temp_path_for(path);
    match fs::metadata(&temp_path).await {
        Ok(meta) if meta.is_file() => {
            fs::remove_file(&temp_path).await?;
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_temp_path_appends_suffix() {
        let path = Path::new("/data/events.json");
        assert_eq!(temp_path_for(path), PathBuf::from("/data/events.json.tmp"));
    }

    #[tokio::test]
    async fn test_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        atomic_write(&path, b"[1,2,3]").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "[1,2,3]");

        // Temp file should not exist
        assert!(!temp_path_for(&path).exists());
    }

    #[tokio::test]
    async fn test_atomic_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        std::fs::write(&path, "old content that is longer").unwrap();

        atomic_write(&path, b"new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_atomic_write_failure_keeps_original() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        std::fs::write(&path, "original").unwrap();

        // A directory squatting on the temp path makes File::create fail
        std::fs::create_dir(temp_path_for(&path)).unwrap();

        assert!(atomic_write(&path, b"replacement").await.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[tokio::test]
    async fn test_cleanup_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");

        assert!(!cleanup_temp_file(&path).await.unwrap());

        std::fs::write(temp_path_for(&path), "partial").unwrap();
        assert!(cleanup_temp_file(&path).await.unwrap());
        assert!(!temp_path_for(&path).exists());
    }
}
