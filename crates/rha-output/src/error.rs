//! Error types for output resolution

use rha_path::PathError;
use serde_json::Value;

/// Errors raised while resolving a step's output directive
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// `references` missing, not a string, or empty
    #[error("references must be a non-empty string to resolve a @translate output, found {found}")]
    InvalidReferences { found: Value },

    /// Path grammar failure
    #[error(transparent)]
    Path(#[from] PathError),
}

impl ResolveError {
    /// Check if error is caused by the caller's input
    #[inline]
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        match self {
            Self::InvalidReferences { .. } => true,
            Self::Path(e) => e.is_bad_request(),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::Path(e) if e.is_invariant_violation())
    }
}
