//! Error types for artifact operations

use rha_store::StoreError;
use std::path::PathBuf;

/// Errors raised by [`Artifact`](crate::Artifact) operations
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// Write or delete on a readonly artifact
    #[error("access denied: cannot {operation} readonly artifact '{uri}'")]
    AccessDenied {
        uri: String,
        operation: &'static str,
    },

    /// `@gitroot/` used outside any git repository
    #[error("no git root found at or above {cwd}")]
    GitRootNotFound { cwd: PathBuf },

    /// Process working directory could not be read
    #[error("could not determine working directory: {0}")]
    WorkingDir(#[source] std::io::Error),

    /// Underlying file store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Internal invariant broken
    #[error("artifact invariant violated: {0}")]
    InvariantViolation(String),
}

impl ArtifactError {
    /// Check if error is a policy violation
    #[inline]
    #[must_use]
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Self::AccessDenied { .. })
    }

    /// Check if error signals misuse or corruption rather than bad input
    #[inline]
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        match self {
            Self::GitRootNotFound { .. } | Self::InvariantViolation(_) => true,
            Self::Store(e) => e.is_invariant_violation(),
            Self::AccessDenied { .. } | Self::WorkingDir(_) => false,
        }
    }

    /// Fatal errors are never retried or recovered
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !self.is_access_denied()
    }
}

/// Result type alias for artifact operations
pub type ArtifactResult<T> = Result<T, ArtifactError>;
