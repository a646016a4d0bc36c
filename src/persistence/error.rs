//! Error types for persistence and store operations

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Numeric error codes shared with the front-end.
///
/// 100-199 are general errors, 200-299 are file errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// Stored document could not be parsed
    ParseError = 101,
    /// The operation was cut short before it could finish
    Interrupted = 102,
    /// File or directory could not be accessed
    NoPermission = 200,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// What a file error was about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    File,
    Directory,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::File => write!(f, "file"),
            FileKind::Directory => write!(f, "directory"),
        }
    }
}

/// Errors that can occur while loading or saving a JSON document
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    Directory { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The document exists but is not what we expect. A verbatim copy was
    /// written to `backup` when that succeeded.
    #[error("Failed to parse {}, the data may be corrupted: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        reason: String,
        backup: Option<PathBuf>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The task running a transaction was cancelled, e.g. at runtime shutdown
    #[error("Store operation was interrupted: {0}")]
    Interrupted(#[source] tokio::task::JoinError),
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Directory { .. } | StoreError::Write { .. } | StoreError::Read { .. } => {
                ErrorCode::NoPermission
            }
            StoreError::Parse { .. } | StoreError::Serialization(_) => ErrorCode::ParseError,
            StoreError::Interrupted(_) => ErrorCode::Interrupted,
        }
    }

    /// File or directory, for file errors
    pub fn kind(&self) -> Option<FileKind> {
        match self {
            StoreError::Directory { .. } => Some(FileKind::Directory),
            StoreError::Write { .. } | StoreError::Read { .. } | StoreError::Parse { .. } => {
                Some(FileKind::File)
            }
            StoreError::Serialization(_) | StoreError::Interrupted(_) => None,
        }
    }

    /// Path the error refers to
    pub fn path(&self) -> Option<&Path> {
        match self {
            StoreError::Directory { path, .. }
            | StoreError::Write { path, .. }
            | StoreError::Read { path, .. }
            | StoreError::Parse { path, .. } => Some(path),
            StoreError::Serialization(_) | StoreError::Interrupted(_) => None,
        }
    }

    /// Whether this is the "data may be corrupted" condition
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Parse { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
