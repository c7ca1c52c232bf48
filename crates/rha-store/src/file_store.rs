//! Local file store
//!
//! Raw read/write/remove of a single file path. Writes are verified by
//! reading the file back; hashes are always taken from what is on disk.

use crate::error::{StoreError, StoreResult};
use crate::git_file::GitFile;
use crate::io::{FileIo, TokioFs};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a URI points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLocation {
    /// Local filesystem path
    Local(PathBuf),
    /// `scheme://...` URI; no backend exists for these
    Remote { scheme: String },
}

impl FileLocation {
    /// Classify a URI
    ///
    /// Anything shaped like `scheme://rest` is remote; everything else is a
    /// local path.
    #[must_use]
    pub fn parse(uri: &str) -> Self {
        if let Some((scheme, _)) = uri.split_once("://") {
            let is_scheme = scheme
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if is_scheme {
                return Self::Remote {
                    scheme: scheme.to_ascii_lowercase(),
                };
            }
        }
        Self::Local(PathBuf::from(uri))
    }
}

/// File store over the local filesystem
///
/// Cheap to clone; clones share the same [`FileIo`].
#[derive(Debug, Clone)]
pub struct FileStore {
    io: Arc<dyn FileIo>,
}

impl Default for FileStore {
    fn default() -> Self {
        Self::with_io(Arc::new(TokioFs))
    }
}

impl FileStore {
    /// Create store over `tokio::fs`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store over a custom filesystem implementation
    #[inline]
    #[must_use]
    pub fn with_io(io: Arc<dyn FileIo>) -> Self {
        Self { io }
    }

    /// Read a UTF-8 file
    ///
    /// # Returns
    /// `None` when the file does not exist
    ///
    /// # Errors
    /// - `StoreError::UnsupportedUri` for non-local URIs
    /// - `StoreError::Io` for any failure other than not-found
    pub async fn read(&self, uri: &str) -> StoreResult<Option<GitFile>> {
        let path = local_path(uri)?;
        match self.io.read_to_string(&path).await {
            Ok(content) => {
                tracing::debug!(uri, bytes = content.len(), "read file");
                Ok(Some(GitFile::new(uri, content)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(uri, "file not found");
                Ok(None)
            }
            Err(e) => Err(StoreError::io_error(path, e)),
        }
    }

    /// Write a UTF-8 file and verify it
    ///
    /// Parent directories are created as needed. The file is read back and
    /// compared to `content`; the returned [`GitFile`] reflects the disk.
    ///
    /// # Errors
    /// - `StoreError::UnsupportedUri` for non-local URIs
    /// - `StoreError::Io` if directory creation, write, or re-read fails
    /// - `StoreError::WriteMismatch` / `StoreError::WriteVanished` if the
    ///   re-read does not return exactly `content`
    pub async fn write(&self, uri: &str, content: &str) -> StoreResult<GitFile> {
        let path = local_path(uri)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.io
                .create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io_error(parent, e))?;
        }

        self.io
            .write(&path, content)
            .await
            .map_err(|e| StoreError::io_error(&path, e))?;

        let Some(written) = self.read(uri).await? else {
            tracing::warn!(uri, "file missing after write");
            return Err(StoreError::WriteVanished { path });
        };

        if written.content != content {
            tracing::warn!(uri, "content mismatch after write");
            return Err(StoreError::WriteMismatch {
                path,
                expected: crate::ContentHash::compute(content.as_bytes()),
                actual: written.hash,
            });
        }

        tracing::debug!(uri, hash = %written.hash, "wrote file");
        Ok(written)
    }

    /// Remove a file
    ///
    /// Removing a file that does not exist succeeds.
    ///
    /// # Errors
    /// - `StoreError::UnsupportedUri` for non-local URIs
    /// - `StoreError::Io` for any failure other than not-found
    pub async fn remove(&self, uri: &str) -> StoreResult<()> {
        let path = local_path(uri)?;
        match self.io.remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(uri, "removed file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(uri, "remove skipped, already gone");
                Ok(())
            }
            Err(e) => Err(StoreError::io_error(path, e)),
        }
    }
}

fn local_path(uri: &str) -> StoreResult<PathBuf> {
    match FileLocation::parse(uri) {
        FileLocation::Local(path) => Ok(path),
        FileLocation::Remote { .. } => Err(StoreError::UnsupportedUri {
            uri: uri.to_string(),
        }),
    }
}

/// Check whether a URI is served by the local store
#[inline]
#[must_use]
pub fn is_local_uri(uri: &str) -> bool {
    matches!(FileLocation::parse(uri), FileLocation::Local(_))
}

/// Convert a path into the string URI form the store takes
#[inline]
#[must_use]
pub fn path_to_uri(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
