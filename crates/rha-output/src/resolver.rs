//! Output directive resolution
//!
//! A step declaring `output: "@translate(references.0).as(story)"` gets its
//! output replaced by the path translated from the first entry of its
//! comma-joined `references`. Any other step passes through untouched.

use crate::error::ResolveError;
use rha_path::{is_translate_directive, translate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A pipeline step's configuration, kept as an open JSON object
///
/// Only `output` and `references` are interpreted; every other field is
/// carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepOutputConfig(Map<String, Value>);

impl StepOutputConfig {
    /// Create from a JSON object
    #[inline]
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Declared output, when present
    #[inline]
    #[must_use]
    pub fn output(&self) -> Option<&Value> {
        self.0.get("output")
    }

    #[inline]
    #[must_use]
    pub fn references(&self) -> Option<&Value> {
        self.0.get("references")
    }

    /// With output replaced
    #[must_use]
    pub fn with_output(mut self, output: impl Into<Value>) -> Self {
        self.0.insert("output".to_string(), output.into());
        self
    }

    /// With references replaced
    #[must_use]
    pub fn with_references(mut self, references: impl Into<Value>) -> Self {
        self.0.insert("references".to_string(), references.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Output directive, if the declared output is one
    fn directive(&self) -> Option<&str> {
        self.output()
            .and_then(Value::as_str)
            .filter(|output| is_translate_directive(output))
    }
}

impl From<Map<String, Value>> for StepOutputConfig {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Resolves `@translate(...)` outputs before a step's artifact is written
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputPathResolver;

impl OutputPathResolver {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Replace a directive output with its translated path
    ///
    /// # Errors
    /// - `InvalidReferences` if `references` is not a non-empty string
    /// - `Path` for any directive or source path failure
    pub fn resolve(&self, config: StepOutputConfig) -> Result<StepOutputConfig, ResolveError> {
        let Some(directive) = config.directive() else {
            return Ok(config);
        };

        let source = first_reference(config.references())?;
        let output = translate(directive, source)?;
        tracing::debug!(directive, source, output = %output, "resolved step output");
        Ok(config.with_output(output))
    }
}

/// Resolve with the default resolver
///
/// # Errors
/// See [`OutputPathResolver::resolve`]
pub fn resolve_output_path(config: StepOutputConfig) -> Result<StepOutputConfig, ResolveError> {
    OutputPathResolver::new().resolve(config)
}

/// First entry of a comma-joined references string, trimmed
///
/// Only the string itself must be non-empty; a blank first entry is left for
/// the path grammar to reject.
fn first_reference(references: Option<&Value>) -> Result<&str, ResolveError> {
    match references.and_then(Value::as_str) {
        Some(joined) if !joined.is_empty() => {
            Ok(joined.split(',').next().unwrap_or_default().trim())
        }
        _ => Err(ResolveError::InvalidReferences {
            found: references.cloned().unwrap_or(Value::Null),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rha_path::PathError;
    use serde_json::json;

    fn config(value: Value) -> StepOutputConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn static_output_passes_through() {
        let input = config(json!({ "output": "out/plan.md", "references": 7, "extra": [1, 2] }));
        assert_eq!(resolve_output_path(input.clone()).unwrap(), input);
    }

    #[test]
    fn non_string_output_passes_through() {
        let input = config(json!({ "output": { "uri": "x" } }));
        assert_eq!(resolve_output_path(input.clone()).unwrap(), input);

        let input = config(json!({ "name": "no output at all" }));
        assert_eq!(resolve_output_path(input.clone()).unwrap(), input);
    }

    #[test]
    fn directive_output_is_translated() {
        let input = config(json!({
            "output": "@translate(references.0).as(story)",
            "references": "src/persp.v2i3.[stories].v5.i7.md",
            "role": "writer",
        }));
        let resolved = resolve_output_path(input).unwrap();
        assert_eq!(
            resolved.output(),
            Some(&json!("src/persp.v2i3.v5i7.[story].v1.md"))
        );
        assert_eq!(resolved.fields().get("role"), Some(&json!("writer")));
    }

    #[test]
    fn directive_keyword_is_case_insensitive() {
        let input = config(json!({
            "output": "@TRANSLATE(references.0).as(story)",
            "references": "a/b.[x].md",
        }));
        assert_eq!(
            resolve_output_path(input).unwrap().output(),
            Some(&json!("a/b.[story].v1.md"))
        );
    }

    #[test]
    fn only_first_reference_is_used() {
        let input = config(json!({
            "output": "@translate(references.0).as(story)",
            "references": "  a/first.[x].md , b/second.[y].txt",
        }));
        assert_eq!(
            resolve_output_path(input).unwrap().output(),
            Some(&json!("a/first.[story].v1.md"))
        );
    }

    #[test]
    fn references_must_be_non_empty_string() {
        let directive = "@translate(references.0).as(story)";
        for references in [json!(null), json!(""), json!(["a.[x].md"])] {
            let input = StepOutputConfig::default()
                .with_output(directive)
                .with_references(references.clone());
            let err = resolve_output_path(input).unwrap_err();
            assert_eq!(err, ResolveError::InvalidReferences { found: references });
        }

        let missing = StepOutputConfig::default().with_output(directive);
        assert_eq!(
            resolve_output_path(missing).unwrap_err(),
            ResolveError::InvalidReferences { found: Value::Null }
        );
    }

    #[test]
    fn blank_first_reference_reaches_the_grammar() {
        let input = config(json!({
            "output": "@translate(references.0).as(story)",
            "references": "  , b.[x].md",
        }));
        let err = resolve_output_path(input).unwrap_err();
        assert!(
            matches!(err, ResolveError::Path(PathError::DoctypeNotFound { .. })),
            "{err:?}"
        );
    }

    #[test]
    fn grammar_errors_surface_unchanged() {
        let input = config(json!({
            "output": "@translate(references.1).as(story)",
            "references": "a.[x].md",
        }));
        let err = resolve_output_path(input).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::Path(PathError::UnsupportedReferenceIndex { .. })
        ));
        assert!(err.is_bad_request());

        let input = config(json!({
            "output": "@translate(references.0).as(story)",
            "references": "dir/plain.md",
        }));
        let err = resolve_output_path(input).unwrap_err();
        assert!(err.to_string().contains("could not find any [doctype]"));
    }
}
