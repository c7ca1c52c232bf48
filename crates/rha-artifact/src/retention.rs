//! Version retention
//!
//! When enabled, every `set` also writes a historical copy at a path rendered
//! from a [`VersionRouteTemplate`], relative to the primary file's directory:
//!
//! ```text
//! out/notes.md  →  out/.rhachet/artifact/notes/2026-01-02T03:04:05.678Z.46b9dd2b0ba88d13.md
//! ```

use chrono::{DateTime, Utc};
use rha_path::{join_normalized, split_basename};
use rha_store::Fingerprint;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Default retention route
pub const DEFAULT_VERSION_ROUTE: &str = "./.rhachet/artifact/{key}/{unidatetime}.{hash}.{ext}";

/// Route pattern with `{key}`, `{unidatetime}`, `{hash}`, `{ext}` placeholders
///
/// - `{key}`: basename without its final extension
/// - `{unidatetime}`: UTC write time, `YYYY-MM-DDTHH:MM:SS.mmmZ`
/// - `{hash}`: 16-hex-char SHAKE-256 fingerprint of the content
/// - `{ext}`: final extension, without the dot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionRouteTemplate(String);

impl VersionRouteTemplate {
    /// Create template from a pattern
    #[inline]
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The default `.rhachet/artifact` route
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        Self::new(DEFAULT_VERSION_ROUTE)
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the retention uri for a primary file
    ///
    /// Relative patterns are joined onto the primary file's directory; an
    /// empty `{ext}` drops the dot that would otherwise dangle at the end.
    #[must_use]
    pub fn render(&self, primary_uri: &str, content: &str, now: DateTime<Utc>) -> String {
        let (dir, basename) = split_basename(primary_uri);
        let (key, ext) = split_extension(basename);
        let unidatetime = now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string();
        let hash = Fingerprint::compute(content.as_bytes()).to_string();

        let mut rendered = substitute(&self.0, |name| match name {
            "key" => Some(key),
            "unidatetime" => Some(unidatetime.as_str()),
            "hash" => Some(hash.as_str()),
            "ext" => Some(ext),
            _ => None,
        });
        if ext.is_empty() {
            while rendered.ends_with('.') {
                rendered.pop();
            }
        }

        if rendered.starts_with('/') {
            join_normalized("/", &rendered)
        } else {
            join_normalized(dir, &rendered)
        }
    }
}

impl Default for VersionRouteTemplate {
    fn default() -> Self {
        Self::standard()
    }
}

impl Display for VersionRouteTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether and where to keep historical copies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VersionRetention {
    /// No copies (default; also what `{ omit = true }` selects)
    #[default]
    Disabled,
    /// Copy every write to this route
    Route(VersionRouteTemplate),
}

impl VersionRetention {
    /// Retention on the default route
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        Self::Route(VersionRouteTemplate::standard())
    }

    /// Route to render, if retention is on
    #[inline]
    #[must_use]
    pub fn route(&self) -> Option<&VersionRouteTemplate> {
        match self {
            Self::Disabled => None,
            Self::Route(route) => Some(route),
        }
    }
}

impl From<bool> for VersionRetention {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::standard()
        } else {
            Self::Disabled
        }
    }
}

impl From<VersionRouteTemplate> for VersionRetention {
    fn from(route: VersionRouteTemplate) -> Self {
        Self::Route(route)
    }
}

/// `notes.v1.md` → (`notes.v1`, `md`); dotfiles have no extension
fn split_extension(basename: &str) -> (&str, &str) {
    match basename.rfind('.') {
        Some(i) if i > 0 => (&basename[..i], &basename[i + 1..]),
        _ => (basename, ""),
    }
}

/// Replace `{name}` placeholders in one pass; unknown names stay literal
fn substitute<'a>(pattern: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(pattern.len() + 48);
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}').and_then(|close| Some((close, lookup(&after[..close])?))) {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
