//! Config file loading

use anyhow::Context;
use rha_artifact::ArtifactConfig;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "rhachet.toml";

/// Load artifact settings
///
/// An explicit path must exist. Without one, `<cwd>/rhachet.toml` is used if
/// present, else defaults apply.
///
/// # Errors
/// Unreadable file or invalid TOML
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<ArtifactConfig> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = cwd.join(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                return Ok(ArtifactConfig::default());
            }
            fallback
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("invalid config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded artifact config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rha_artifact::AccessMode;

    #[test]
    fn missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(None, dir.path()).unwrap(), ArtifactConfig::default());
    }

    #[test]
    fn default_file_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "access = \"readonly\"").unwrap();
        assert_eq!(load_config(None, dir.path()).unwrap().access, AccessMode::Readonly);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "versions = 3").unwrap();
        let err = load_config(Some(&path), dir.path()).unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
