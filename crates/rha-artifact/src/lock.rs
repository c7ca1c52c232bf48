//! In-process write serialization keyed by resolved uri
//!
//! Artifacts sharing a [`UriLocks`] take turns on `set`/`del` for the same
//! target. Other processes, and artifacts not sharing the registry, are not
//! coordinated.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-uri async mutexes
///
/// Cheap to clone; clones share the same registry. An entry lives only while
/// some artifact holds or waits on it.
#[derive(Debug, Clone, Default)]
pub struct UriLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl UriLocks {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive use of `uri`
    pub async fn acquire(&self, uri: &str) -> UriGuard {
        let lock = Arc::clone(self.inner.entry(uri.to_string()).or_default().value());
        UriGuard {
            guard: Some(lock.lock_owned().await),
            uri: uri.to_string(),
            registry: Arc::clone(&self.inner),
        }
    }

    /// Number of uris currently held or awaited
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Exclusive hold on one uri; releasing it prunes the registry entry when
/// nobody else is waiting
#[derive(Debug)]
pub struct UriGuard {
    guard: Option<OwnedMutexGuard<()>>,
    uri: String,
    registry: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Drop for UriGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        // the registry's own handle is the only one left
        self.registry
            .remove_if(&self.uri, |_, lock| Arc::strong_count(lock) == 1);
    }
}
