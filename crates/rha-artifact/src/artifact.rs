//! Artifact trait and the git-file implementation

use crate::error::{ArtifactError, ArtifactResult};
use crate::options::ArtifactOptions;
use crate::uri::{is_gitroot_uri, resolve_uri};
use async_trait::async_trait;
use chrono::Utc;
use rha_store::{GitFile, GitFileRef};
use serde::{Deserialize, Serialize};

/// A persisted, addressable unit of content
///
/// `get` reports absence as `None`; `set` and `del` honor the access mode
/// the artifact was created with.
#[async_trait]
pub trait Artifact: Send + Sync {
    /// Reference type identifying the artifact
    type Ref;
    /// Value type returned by reads and writes
    type Value;
    /// Update payload accepted by `set`
    type Update: Send;

    /// Reference this artifact was created from
    fn reference(&self) -> &Self::Ref;

    /// Read the current value
    async fn get(&self) -> ArtifactResult<Option<Self::Value>>;

    /// Replace the current value
    async fn set(&self, update: Self::Update) -> ArtifactResult<Self::Value>;

    /// Remove the value; already absent is success
    async fn del(&self) -> ArtifactResult<()>;
}

/// New content for a [`GitFileArtifact`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitFileUpdate {
    pub content: String,
}

impl From<&str> for GitFileUpdate {
    fn from(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

impl From<String> for GitFileUpdate {
    fn from(content: String) -> Self {
        Self { content }
    }
}

/// Text file artifact addressed by a path or `@gitroot/` uri
#[derive(Debug, Clone)]
pub struct GitFileArtifact {
    reference: GitFileRef,
    options: ArtifactOptions,
}

impl GitFileArtifact {
    /// Create artifact
    #[must_use]
    pub fn new(reference: impl Into<GitFileRef>, options: ArtifactOptions) -> Self {
        Self {
            reference: reference.into(),
            options,
        }
    }

    #[inline]
    #[must_use]
    pub fn options(&self) -> &ArtifactOptions {
        &self.options
    }

    /// Resolve the reference uri; the working directory is only consulted
    /// for aliased uris
    ///
    /// # Errors
    /// `GitRootNotFound` or `WorkingDir` when alias resolution fails
    pub fn resolve(&self) -> ArtifactResult<String> {
        let uri = self.reference.uri.as_str();
        if !is_gitroot_uri(uri) {
            return Ok(uri.to_string());
        }
        let cwd = self.options.working_dir.current()?;
        resolve_uri(uri, &cwd)
    }

    fn guard_writable(&self, operation: &'static str) -> ArtifactResult<()> {
        if self.options.access.is_readonly() {
            tracing::warn!(uri = %self.reference.uri, operation, "rejected write to readonly artifact");
            return Err(ArtifactError::AccessDenied {
                uri: self.reference.uri.clone(),
                operation,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Artifact for GitFileArtifact {
    type Ref = GitFileRef;
    type Value = GitFile;
    type Update = GitFileUpdate;

    fn reference(&self) -> &GitFileRef {
        &self.reference
    }

    async fn get(&self) -> ArtifactResult<Option<GitFile>> {
        let uri = self.resolve()?;
        Ok(self.options.store.read(&uri).await?)
    }

    async fn set(&self, update: GitFileUpdate) -> ArtifactResult<GitFile> {
        self.guard_writable("set")?;
        let uri = self.resolve()?;
        let _guard = match &self.options.locks {
            Some(locks) => Some(locks.acquire(&uri).await),
            None => None,
        };

        let store = &self.options.store;
        let content = update.content.as_str();
        let retention_uri = self
            .options
            .versions
            .route()
            .map(|route| route.render(&uri, content, Utc::now()));

        let mut writes = vec![store.write(&uri, content)];
        if let Some(retention_uri) = &retention_uri {
            tracing::debug!(uri = %uri, retention = %retention_uri, "retaining version");
            writes.push(store.write(retention_uri, content));
        }
        let written = futures::future::try_join_all(writes).await?;

        written.into_iter().next().ok_or_else(|| {
            ArtifactError::InvariantViolation(format!("no primary write result for '{uri}'"))
        })
    }

    async fn del(&self) -> ArtifactResult<()> {
        self.guard_writable("del")?;
        let uri = self.resolve()?;
        let _guard = match &self.options.locks {
            Some(locks) => Some(locks.acquire(&uri).await),
            None => None,
        };
        self.options.store.remove(&uri).await?;
        Ok(())
    }
}

/// Create a git-file artifact
///
/// ```rust,ignore
/// let artifact = gen_artifact_git_file("@gitroot/out/notes.md", ArtifactOptions::new().with_versions(true));
/// artifact.set("hello".into()).await?;
/// ```
#[must_use]
pub fn gen_artifact_git_file(
    reference: impl Into<GitFileRef>,
    options: ArtifactOptions,
) -> GitFileArtifact {
    GitFileArtifact::new(reference, options)
}
