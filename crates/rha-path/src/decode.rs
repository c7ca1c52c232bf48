//! Decoding of doctype-versioned paths
//!
//! A path has the shape `<anything>/<prefix>.[<doctype>]<tail>` where the tail
//! is a dot-delimited run of version markers and an extension:
//!
//! - `a/b.[stories].v1.i3.md` → prefix `a/b`, doctype `stories`, v1 i3, `md`
//! - `a/b.[stories]._.md` → `_` marks "no version info"
//! - `a/b.[stories]` → no versions, no extension

use crate::error::PathError;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Version markers of a decoded path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct VersionTrail {
    /// From a `v<N>` token
    pub variant: Option<u32>,
    /// From an `i<N>` token
    pub instance: Option<u32>,
}

impl VersionTrail {
    /// Create new trail
    #[inline]
    #[must_use]
    pub const fn new(variant: Option<u32>, instance: Option<u32>) -> Self {
        Self { variant, instance }
    }

    /// True when neither marker is present
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.variant.is_none() && self.instance.is_none()
    }

    /// Single-token form, e.g. `v2i3`, `v2`, `i3`
    ///
    /// `None` when the trail is empty.
    #[must_use]
    pub fn compressed(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut out = String::new();
        if let Some(v) = self.variant {
            out.push_str(&format!("v{v}"));
        }
        if let Some(i) = self.instance {
            out.push_str(&format!("i{i}"));
        }
        Some(out)
    }
}

/// A path split into its grammar parts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DecodedPath {
    /// Everything before `.[doctype]`, directories included
    pub prefix: String,
    /// Text inside the authoritative bracket group
    pub doctype: String,
    pub versions: VersionTrail,
    /// Last trailing token that is not a version marker
    pub extension: Option<String>,
}

impl DecodedPath {
    /// Recompose into `prefix.[doctype].vN.iM.ext`, skipping absent parts
    #[must_use]
    pub fn compose(&self) -> String {
        let mut segments = vec![format!("[{}]", self.doctype)];
        if let Some(v) = self.versions.variant {
            segments.push(format!("v{v}"));
        }
        if let Some(i) = self.versions.instance {
            segments.push(format!("i{i}"));
        }
        if let Some(ext) = &self.extension {
            segments.push(ext.clone());
        }
        join_after_prefix(&self.prefix, &segments)
    }
}

impl Display for DecodedPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compose())
    }
}

impl FromStr for DecodedPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Decode a path into prefix, doctype, versions, and extension
///
/// Only bracket groups after the final `/` count; when several are present
/// the last one wins and the others stay in the prefix.
///
/// # Errors
/// `PathError::DoctypeNotFound` if no `[doctype]` follows the last `/`
pub fn decode(path: &str) -> Result<DecodedPath, PathError> {
    let basename_start = path.rfind('/').map_or(0, |i| i + 1);
    let basename = &path[basename_start..];

    let (open, close) = last_bracket_group(basename).ok_or_else(|| PathError::DoctypeNotFound {
        path: path.to_string(),
    })?;

    let head = &path[..basename_start + open];
    let prefix = head.strip_suffix('.').unwrap_or(head);
    let doctype = &basename[open + 1..close];

    let mut versions = VersionTrail::default();
    let mut extension = None;
    for token in basename[close + 1..].split('.').filter(|t| !t.is_empty()) {
        if token == "_" {
            continue;
        }
        if let Some(n) = marker_number(token, 'v') {
            versions.variant = Some(n);
        } else if let Some(n) = marker_number(token, 'i') {
            versions.instance = Some(n);
        } else {
            extension = Some(token.to_string());
        }
    }

    Ok(DecodedPath {
        prefix: prefix.to_string(),
        doctype: doctype.to_string(),
        versions,
        extension,
    })
}

/// Byte offsets of `[` and `]` of the last non-empty bracket group
fn last_bracket_group(name: &str) -> Option<(usize, usize)> {
    let mut search_end = name.len();
    loop {
        let open = name[..search_end].rfind('[')?;
        if let Some(len) = name[open + 1..].find(']') {
            let close = open + 1 + len;
            let inner = &name[open + 1..close];
            if !inner.is_empty() && !inner.contains('[') {
                return Some((open, close));
            }
        }
        search_end = open;
    }
}

/// `v12` / `V12` → 12 for marker `v`
fn marker_number(token: &str, marker: char) -> Option<u32> {
    let mut chars = token.chars();
    let first = chars.next()?;
    if !first.eq_ignore_ascii_case(&marker) {
        return None;
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Join `segments` with `.` and attach them to `prefix`
///
/// No separator dot is inserted after an empty prefix or one ending in `/`.
pub(crate) fn join_after_prefix(prefix: &str, segments: &[String]) -> String {
    let tail = segments.join(".");
    if prefix.is_empty() || prefix.ends_with('/') {
        format!("{prefix}{tail}")
    } else {
        format!("{prefix}.{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_full_path() {
        let decoded = decode("a/b.[stories].v1.i3.md").unwrap();
        assert_eq!(
            decoded,
            DecodedPath {
                prefix: "a/b".to_string(),
                doctype: "stories".to_string(),
                versions: VersionTrail::new(Some(1), Some(3)),
                extension: Some("md".to_string()),
            }
        );
    }

    #[test]
    fn decode_without_tail() {
        let decoded = decode("dir/file.[story]").unwrap();
        assert_eq!(decoded.prefix, "dir/file");
        assert_eq!(decoded.doctype, "story");
        assert!(decoded.versions.is_empty());
        assert_eq!(decoded.extension, None);
    }

    #[test]
    fn decode_extension_only() {
        let decoded = decode("dir/file.[story].md").unwrap();
        assert!(decoded.versions.is_empty());
        assert_eq!(decoded.extension.as_deref(), Some("md"));
    }

    #[test]
    fn decode_underscore_is_not_an_extension() {
        let decoded = decode("dir/file.[story]._").unwrap();
        assert!(decoded.versions.is_empty());
        assert_eq!(decoded.extension, None);

        let decoded = decode("dir/file.[story]._.md").unwrap();
        assert_eq!(decoded.extension.as_deref(), Some("md"));
    }

    #[test]
    fn decode_markers_are_case_insensitive() {
        let decoded = decode("x.[doc].V4.I9.txt").unwrap();
        assert_eq!(decoded.versions, VersionTrail::new(Some(4), Some(9)));
    }

    #[test]
    fn decode_last_marker_wins() {
        let decoded = decode("x.[doc].v1.v2.i1.i5").unwrap();
        assert_eq!(decoded.versions, VersionTrail::new(Some(2), Some(5)));
    }

    #[test]
    fn decode_last_non_marker_token_is_extension() {
        let decoded = decode("x.[doc].tar.v1.gz").unwrap();
        assert_eq!(decoded.extension.as_deref(), Some("gz"));
        assert_eq!(decoded.versions.variant, Some(1));
    }

    #[test]
    fn decode_compressed_trail_in_tail_is_extension_candidate() {
        let decoded = decode("x.[doc].v2i3").unwrap();
        assert!(decoded.versions.is_empty());
        assert_eq!(decoded.extension.as_deref(), Some("v2i3"));
    }

    #[test]
    fn decode_last_bracket_group_is_authoritative() {
        let decoded = decode("out/persp.[draft].notes.[stories].v5.md").unwrap();
        assert_eq!(decoded.prefix, "out/persp.[draft].notes");
        assert_eq!(decoded.doctype, "stories");
        assert_eq!(decoded.versions.variant, Some(5));
    }

    #[test]
    fn decode_keeps_prior_trail_in_prefix() {
        let decoded = decode("src/persp_pro.v2i3.[stories].v5.i7.md").unwrap();
        assert_eq!(decoded.prefix, "src/persp_pro.v2i3");
        assert_eq!(decoded.versions, VersionTrail::new(Some(5), Some(7)));
    }

    #[test]
    fn decode_rejects_doctype_before_last_slash() {
        let result = decode("a/b.[draft]/c/topic.v1i2.i3.md");
        assert!(matches!(result, Err(PathError::DoctypeNotFound { .. })));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("could not find any [doctype]"));
    }

    #[test]
    fn decode_rejects_plain_path() {
        assert!(decode("a/b/c.md").is_err());
        assert!(decode("a/b/c.[].md").is_err());
    }

    #[test]
    fn decode_bracket_at_start_of_basename() {
        let decoded = decode("dir/[doc].md").unwrap();
        assert_eq!(decoded.prefix, "dir/");
        assert_eq!(decoded.compose(), "dir/[doc].md");
    }

    #[test]
    fn compose_round_trips_well_formed_paths() {
        for path in [
            "a/b.[stories].v1.i3.md",
            "a/b.[stories].md",
            "b.[stories]",
            "/abs/x.v2i3.[story].v1.txt",
        ] {
            assert_eq!(decode(path).unwrap().to_string(), path);
        }
    }

    #[test]
    fn compressed_trail_forms() {
        assert_eq!(VersionTrail::new(Some(2), Some(3)).compressed().as_deref(), Some("v2i3"));
        assert_eq!(VersionTrail::new(Some(2), None).compressed().as_deref(), Some("v2"));
        assert_eq!(VersionTrail::new(None, Some(3)).compressed().as_deref(), Some("i3"));
        assert_eq!(VersionTrail::default().compressed(), None);
    }

    #[test]
    fn from_str_decodes() {
        let decoded: DecodedPath = "a.[b].c".parse().unwrap();
        assert_eq!(decoded.doctype, "b");
    }
}
