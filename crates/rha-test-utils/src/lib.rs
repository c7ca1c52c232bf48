//! Testing utilities for the rhachet artifact workspace
//!
//! Shared fixtures: scratch directories with and without a `.git` marker,
//! and a [`FileIo`] double that counts disk calls.

#![allow(missing_docs)]

use async_trait::async_trait;
use rha_store::{path_to_uri, FileIo, FileStore, TokioFs};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Temporary directory that looks like a git repository root
///
/// Only the `.git` marker directory is created; no git tooling is involved.
#[derive(Debug)]
pub struct GitRepoFixture {
    dir: TempDir,
}

impl GitRepoFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Absolute store uri for a repo-relative path
    pub fn uri(&self, rel: &str) -> String {
        path_to_uri(&self.path(rel))
    }

    /// Create (recursively) and return a subdirectory
    pub fn subdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> Option<String> {
        std::fs::read_to_string(self.path(rel)).ok()
    }

    /// All files below `rel`, recursively, sorted
    pub fn files_under(&self, rel: &str) -> Vec<PathBuf> {
        let mut out = Vec::new();
        collect_files(&self.path(rel), &mut out);
        out.sort();
        out
    }
}

impl Default for GitRepoFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Temporary directory with no `.git` marker
pub fn plain_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out);
        } else {
            out.push(path);
        }
    }
}

/// [`FileIo`] over the real filesystem that counts every call
#[derive(Debug, Default)]
pub struct CountingIo {
    calls: AtomicUsize,
}

impl CountingIo {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Store routed through `io`
    pub fn store(io: &Arc<Self>) -> FileStore {
        FileStore::with_io(Arc::clone(io) as Arc<dyn FileIo>)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl FileIo for CountingIo {
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.hit();
        TokioFs.read_to_string(path).await
    }

    async fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        self.hit();
        TokioFs.write(path, content).await
    }

    async fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        self.hit();
        TokioFs.create_dir_all(path).await
    }

    async fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        self.hit();
        TokioFs.remove_file(path).await
    }
}
