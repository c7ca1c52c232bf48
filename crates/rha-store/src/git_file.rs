//! The GitFile record
//!
//! A [`GitFile`] is what a read returns: the uri it came from, its content,
//! and the SHA-256 of that content.

use crate::hash::ContentHash;
use serde::{Deserialize, Serialize};

/// Identity of a [`GitFile`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitFileRef {
    /// Absolute, relative, or `@gitroot/`-aliased path
    pub uri: String,
}

impl GitFileRef {
    /// Create new ref
    #[inline]
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

impl From<&str> for GitFileRef {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for GitFileRef {
    fn from(uri: String) -> Self {
        Self::new(uri)
    }
}

/// A UTF-8 text file as read from disk
///
/// # Invariants
/// - `hash` is always `sha256(content)`
/// - Never cached; every read materializes a fresh value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitFile {
    pub uri: String,
    pub hash: ContentHash,
    pub content: String,
}

impl GitFile {
    /// Create from content (computes hash)
    #[inline]
    #[must_use]
    pub fn new(uri: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            uri: uri.into(),
            hash: ContentHash::compute(content.as_bytes()),
            content,
        }
    }

    /// Identity fields of this file
    #[inline]
    #[must_use]
    pub fn to_ref(&self) -> GitFileRef {
        GitFileRef::new(self.uri.clone())
    }

    /// Verify integrity (useful after deserialization)
    #[inline]
    #[must_use]
    pub fn verify(&self) -> bool {
        self.hash == ContentHash::compute(self.content.as_bytes())
    }
}
