//! Artifact construction options
//!
//! [`ArtifactOptions`] is the builder handed to the factory; [`ArtifactConfig`]
//! is its serde-facing form for config files:
//!
//! ```toml
//! access = "readonly"            # or "readwrite" (default)
//! versions = true                # or { omit = true } / { route = "./history/{key}.{ext}" }
//! lock = true                    # serialize writes per uri in this process
//! ```

use crate::lock::UriLocks;
use crate::retention::{VersionRetention, VersionRouteTemplate};
use crate::uri::WorkingDir;
use rha_store::FileStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Whether an artifact may be written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    #[default]
    Readwrite,
    Readonly,
}

impl AccessMode {
    #[inline]
    #[must_use]
    pub const fn is_readonly(self) -> bool {
        matches!(self, Self::Readonly)
    }
}

/// Options fixed at artifact creation
#[derive(Debug, Clone, Default)]
pub struct ArtifactOptions {
    pub access: AccessMode,
    pub versions: VersionRetention,
    pub working_dir: WorkingDir,
    /// Shared lock registry; `None` means last writer wins
    pub locks: Option<UriLocks>,
    pub store: FileStore,
}

impl ArtifactOptions {
    /// Create default options (readwrite, no retention, process cwd)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With access mode
    #[inline]
    #[must_use]
    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }

    /// Readonly shorthand
    #[inline]
    #[must_use]
    pub fn readonly(self) -> Self {
        self.with_access(AccessMode::Readonly)
    }

    /// With version retention
    #[inline]
    #[must_use]
    pub fn with_versions(mut self, versions: impl Into<VersionRetention>) -> Self {
        self.versions = versions.into();
        self
    }

    /// With fixed working directory for `@gitroot/` resolution
    #[inline]
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.working_dir = WorkingDir::Fixed(cwd.into());
        self
    }

    /// With shared lock registry
    #[inline]
    #[must_use]
    pub fn with_locks(mut self, locks: UriLocks) -> Self {
        self.locks = Some(locks);
        self
    }

    /// With file store
    #[inline]
    #[must_use]
    pub fn with_store(mut self, store: FileStore) -> Self {
        self.store = store;
        self
    }
}

/// The `versions` setting as written in config files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionsSetting {
    /// `versions = true` for the standard route
    Enabled(bool),
    /// `versions = { omit = true }`
    Omit { omit: bool },
    /// `versions = { route = "..." }`
    Route { route: String },
}

impl From<VersionsSetting> for VersionRetention {
    fn from(setting: VersionsSetting) -> Self {
        match setting {
            VersionsSetting::Enabled(enabled) => enabled.into(),
            VersionsSetting::Omit { omit } => (!omit).into(),
            VersionsSetting::Route { route } => VersionRouteTemplate::new(route).into(),
        }
    }
}

/// Serializable artifact settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub access: AccessMode,
    pub versions: Option<VersionsSetting>,
    pub lock: bool,
}

impl ArtifactConfig {
    /// Build options; a fresh lock registry is created when `lock` is set
    #[must_use]
    pub fn into_options(self) -> ArtifactOptions {
        let options = ArtifactOptions::new()
            .with_access(self.access)
            .with_versions(self.versions.map_or(VersionRetention::Disabled, Into::into));
        if self.lock {
            options.with_locks(UriLocks::new())
        } else {
            options
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_readwrite_without_retention() {
        let options = ArtifactOptions::new();
        assert_eq!(options.access, AccessMode::Readwrite);
        assert_eq!(options.versions, VersionRetention::Disabled);
        assert_eq!(options.working_dir, WorkingDir::Process);
        assert!(options.locks.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let options = ArtifactOptions::new()
            .readonly()
            .with_versions(true)
            .with_cwd("/repo");
        assert!(options.access.is_readonly());
        assert_eq!(options.versions, VersionRetention::standard());
        assert_eq!(options.working_dir, WorkingDir::Fixed(PathBuf::from("/repo")));
    }

    #[test]
    fn config_from_toml_variants() {
        let config: ArtifactConfig = toml::from_str("access = \"readonly\"\nversions = true").unwrap();
        assert_eq!(config.access, AccessMode::Readonly);
        assert_eq!(
            config.clone().into_options().versions,
            VersionRetention::standard()
        );

        let config: ArtifactConfig = toml::from_str("versions = { omit = true }").unwrap();
        assert_eq!(config.into_options().versions, VersionRetention::Disabled);

        let config: ArtifactConfig =
            toml::from_str("versions = { route = \"./h/{key}.{ext}\" }\nlock = true").unwrap();
        let options = config.into_options();
        assert_eq!(
            options.versions,
            VersionRetention::Route(VersionRouteTemplate::new("./h/{key}.{ext}"))
        );
        assert!(options.locks.is_some());
    }

    #[test]
    fn empty_config_is_default() {
        let config: ArtifactConfig = toml::from_str("").unwrap();
        assert_eq!(config, ArtifactConfig::default());
        assert_eq!(config.into_options().access, AccessMode::Readwrite);
    }

    #[test]
    fn unknown_access_mode_is_rejected() {
        let result: Result<ArtifactConfig, _> = toml::from_str("access = \"writeonly\"");
        assert!(result.is_err());
    }
}
