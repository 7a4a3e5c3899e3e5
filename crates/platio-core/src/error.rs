//! Error types for file system operations and handle misuse.

use std::path::PathBuf;

use thiserror::Error;

use crate::status::Capability;

/// Errors from path-level file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Path is empty or otherwise unusable.
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason,
        }
    }
}

/// A caller bug detected by a file handle precondition.
///
/// These are distinct from [`Status`](crate::Status): they never describe
/// the file, only the misuse. Debug builds panic on them; release builds
/// skip the operation and hand the violation back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("file handle is closed")]
    HandleClosed,

    #[error("file handle lacks {required:?} capability")]
    MissingCapability { required: Capability },

    #[error("negative absolute position {offset}")]
    NegativeAbsolutePosition { offset: i64 },

    #[error("relative seek by {offset} from {position} lands before start of file")]
    NegativeRelativePosition { position: u64, offset: i64 },
}

impl ContractViolation {
    /// Report the violation: panic in debug builds, `Err(self)` otherwise.
    #[track_caller]
    pub fn raise<T>(self) -> Result<T, Self> {
        tracing::error!(violation = %self, "file handle contract violated");
        if cfg!(debug_assertions) {
            panic!("{self}");
        }
        Err(self)
    }
}
