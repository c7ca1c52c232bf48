//! Error types for the file store
//!
//! Absence is never an error here: a missing file reads as `None` and a
//! missing file deletes successfully. Everything below is fatal to the caller.

use crate::hash::ContentHash;
use std::path::PathBuf;

/// Errors raised by [`FileStore`](crate::FileStore) operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// URI names a non-local backend
    #[error("unsupported file uri: '{uri}' (only local paths are supported)")]
    UnsupportedUri { uri: String },

    /// Filesystem failure other than "not found"
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Re-read after write did not return the requested content
    #[error("write verification failed for {path}: expected {expected}, found {actual}")]
    WriteMismatch {
        path: PathBuf,
        expected: ContentHash,
        actual: ContentHash,
    },

    /// File was gone when re-read after write
    #[error("write verification failed for {path}: file missing after write")]
    WriteVanished { path: PathBuf },
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if error is an invariant violation (silent corruption or misuse)
    #[inline]
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedUri { .. } | Self::WriteMismatch { .. } | Self::WriteVanished { .. }
        )
    }

    /// Kind of the underlying I/O failure, if any
    #[inline]
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// Store errors are never retried
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        true
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
