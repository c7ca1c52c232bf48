//! Rhachet Artifacts
//!
//! Access-controlled file artifacts with optional version retention, layered
//! on [`rha_store::FileStore`].
//!
//! # Core Concepts
//!
//! - [`Artifact`]: async `get`/`set`/`del` over a reference
//! - [`GitFileArtifact`]: a text file addressed by path or `@gitroot/` uri
//! - [`ArtifactOptions`]: access mode, retention, working directory, locks
//! - [`VersionRetention`]: historical copies written alongside each `set`
//!
//! # Example
//!
//! ```rust,ignore
//! use rha_artifact::{gen_artifact_git_file, Artifact, ArtifactOptions};
//!
//! let notes = gen_artifact_git_file(
//!     "@gitroot/out/notes.md",
//!     ArtifactOptions::new().with_versions(true),
//! );
//! let written = notes.set("draft one".into()).await?;
//! assert_eq!(notes.get().await?, Some(written));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifact;
mod error;
mod lock;
mod options;
mod retention;
mod uri;

pub use artifact::{gen_artifact_git_file, Artifact, GitFileArtifact, GitFileUpdate};
pub use error::{ArtifactError, ArtifactResult};
pub use lock::{UriGuard, UriLocks};
pub use options::{AccessMode, ArtifactConfig, ArtifactOptions, VersionsSetting};
pub use retention::{VersionRetention, VersionRouteTemplate, DEFAULT_VERSION_ROUTE};
pub use uri::{find_git_root, is_gitroot_uri, resolve_uri, WorkingDir};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
