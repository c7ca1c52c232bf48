//! Filesystem seam under [`FileStore`](crate::FileStore)
//!
//! The store only ever touches disk through [`FileIo`]. [`TokioFs`] is the
//! production implementation; tests swap in doubles to count calls or to
//! corrupt what a re-read returns.

use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::Path;

/// Raw file operations used by the store
#[async_trait]
pub trait FileIo: Send + Sync + Debug {
    /// Read a whole file as UTF-8
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate a file with `content`
    async fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Create a directory and its parents; existing is success
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    async fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// [`FileIo`] over `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl FileIo for TokioFs {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        tokio::fs::write(path, content).await
    }

    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}
