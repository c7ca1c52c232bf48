//! Rhachet File Store
//!
//! Leaf persistence layer: read/write/remove of single local UTF-8 files with
//! SHA-256 integrity and write verification.
//!
//! # Core Concepts
//!
//! - [`FileStore`]: local read/write/remove with soft-delete semantics
//! - [`GitFile`]: `{uri, hash, content}` as materialized from disk
//! - [`ContentHash`]: 32-byte SHA-256 hash, hex on display
//! - [`Fingerprint`]: short SHAKE-256 digest for naming retained copies
//! - [`FileIo`]: the filesystem seam; [`TokioFs`] by default
//!
//! # Example
//!
//! ```rust,ignore
//! use rha_store::FileStore;
//!
//! let store = FileStore::new();
//! let file = store.write("notes/today.md", "hello").await?;
//! assert!(file.verify());
//!
//! // absence is not an error
//! assert!(store.read("notes/missing.md").await?.is_none());
//! store.remove("notes/missing.md").await?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod file_store;
mod git_file;
mod hash;
mod io;

pub use error::{StoreError, StoreResult};
pub use file_store::{is_local_uri, path_to_uri, FileLocation, FileStore};
pub use git_file::{GitFile, GitFileRef};
pub use hash::{ContentHash, Fingerprint, HashError};
pub use io::{FileIo, TokioFs};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
