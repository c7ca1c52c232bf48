//! Error types for the path grammar

/// Errors raised while decoding paths or parsing translation directives
///
/// Every variant carries the offending input verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No `[doctype]` after the last path separator
    #[error("could not find any [doctype] after the last '/' in '{path}'")]
    DoctypeNotFound { path: String },

    /// Directive text does not follow the grammar
    #[error("malformed translation directive '{directive}': {reason}")]
    MalformedDirective { directive: String, reason: String },

    /// Source is not `references.<n>`
    #[error("unsupported translation source '{reference}' in '{directive}': expected references.0")]
    UnsupportedSource {
        directive: String,
        reference: String,
    },

    /// Source is `references.<n>` with `n != 0`
    #[error("unsupported translation source references.{index} in '{directive}': only references.0 is supported")]
    UnsupportedReferenceIndex { directive: String, index: String },

    /// `.v(n)` with `n < 1` or not a number
    #[error("translation directive '{directive}': .v({value}) must be a positive integer")]
    InvalidStartVariant { directive: String, value: String },

    /// `.as(doctype)` absent; callers must always supply it
    #[error("translation directive '{directive}' is missing .as(<doctype>)")]
    MissingDoctype { directive: String },
}

impl PathError {
    /// Caller input error, fixable by changing the call
    #[inline]
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        !self.is_invariant_violation()
    }

    /// Should never happen under correct usage
    #[inline]
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::MissingDoctype { .. })
    }

    pub(crate) fn malformed(directive: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDirective {
            directive: directive.to_string(),
            reason: reason.into(),
        }
    }
}
