//! Translation of an upstream output path into the next step's path
//!
//! The new path keeps the source prefix, folds the source's version markers
//! into a single history token, and starts a fresh version counter for the
//! new doctype:
//!
//! ```text
//! persp.v2i3.[stories].v5.i7.md  --as(story)-->  persp.v2i3.v5i7.[story].v1.md
//! ```

use crate::decode::{decode, join_after_prefix};
use crate::directive::TranslateDirective;
use crate::error::PathError;
use crate::relate::relate;

impl TranslateDirective {
    /// Compute the translated path for `source_path`
    ///
    /// # Errors
    /// `PathError::DoctypeNotFound` if `source_path` has no `[doctype]`
    pub fn apply(&self, source_path: &str) -> Result<String, PathError> {
        let decoded = decode(source_path)?;

        let mut segments = Vec::with_capacity(4);
        if let Some(trail) = decoded.versions.compressed() {
            segments.push(trail);
        }
        segments.push(format!("[{}]", self.doctype));
        segments.push(format!("v{}", self.start_variant.unwrap_or(1)));
        if let Some(ext) = self.ext.as_ref().or(decoded.extension.as_ref()) {
            segments.push(ext.clone());
        }

        let composed = join_after_prefix(&decoded.prefix, &segments);
        let translated = match &self.rel {
            Some(relation) => relate(&composed, relation),
            None => composed,
        };

        tracing::debug!(source = source_path, target = %translated, "translated path");
        Ok(translated)
    }
}

/// Parse `directive` and apply it to `source_path`
///
/// # Errors
/// Any directive parse error, or `PathError::DoctypeNotFound` for the source
pub fn translate(directive: &str, source_path: &str) -> Result<String, PathError> {
    TranslateDirective::parse(directive)?.apply(source_path)
}
