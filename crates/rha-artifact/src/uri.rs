//! URI alias resolution
//!
//! `@gitroot/<rest>` resolves to `<nearest git root>/<rest>`, where the git
//! root is the closest ancestor of the working directory holding a `.git`
//! entry. The working directory is an explicit input.

use crate::error::{ArtifactError, ArtifactResult};
use rha_path::GITROOT_ALIAS;
use rha_store::path_to_uri;
use std::path::{Path, PathBuf};

/// Working directory used for alias resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkingDir {
    /// Process working directory, read fresh on every call
    #[default]
    Process,
    /// A fixed directory
    Fixed(PathBuf),
}

impl WorkingDir {
    /// Directory to resolve against right now
    ///
    /// # Errors
    /// `ArtifactError::WorkingDir` if the process cwd is unreadable
    pub fn current(&self) -> ArtifactResult<PathBuf> {
        match self {
            Self::Process => std::env::current_dir().map_err(ArtifactError::WorkingDir),
            Self::Fixed(dir) => Ok(dir.clone()),
        }
    }
}

/// Check whether a uri uses the `@gitroot/` alias
#[inline]
#[must_use]
pub fn is_gitroot_uri(uri: &str) -> bool {
    uri.starts_with(GITROOT_ALIAS)
}

/// Resolve `@gitroot/` against `cwd`; other uris pass through unchanged
///
/// # Errors
/// `ArtifactError::GitRootNotFound` if the alias is used and no ancestor of
/// `cwd` contains `.git`
pub fn resolve_uri(uri: &str, cwd: &Path) -> ArtifactResult<String> {
    let Some(rest) = uri.strip_prefix(GITROOT_ALIAS) else {
        return Ok(uri.to_string());
    };
    let root = find_git_root(cwd).ok_or_else(|| ArtifactError::GitRootNotFound {
        cwd: cwd.to_path_buf(),
    })?;
    let resolved = path_to_uri(&root.join(rest));
    tracing::debug!(uri, resolved = %resolved, "resolved gitroot alias");
    Ok(resolved)
}

/// Nearest ancestor of `start` (inclusive) containing a `.git` entry
#[must_use]
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rha_test_utils::{plain_dir, GitRepoFixture};

    #[test]
    fn plain_uris_pass_through() {
        let dir = plain_dir();
        assert_eq!(resolve_uri("a/b.md", dir.path()).unwrap(), "a/b.md");
        assert_eq!(resolve_uri("/abs/b.md", dir.path()).unwrap(), "/abs/b.md");
        assert_eq!(
            resolve_uri("./@gitroot/x", dir.path()).unwrap(),
            "./@gitroot/x"
        );
    }

    #[test]
    fn gitroot_resolves_from_nested_directory() {
        let repo = GitRepoFixture::new();
        let nested = repo.subdir("packages/app/src");
        let resolved = resolve_uri("@gitroot/out/x.md", &nested).unwrap();
        assert_eq!(resolved, repo.uri("out/x.md"));
    }

    #[test]
    fn gitroot_resolves_from_root_itself() {
        let repo = GitRepoFixture::new();
        assert_eq!(
            resolve_uri("@gitroot/x.md", repo.root()).unwrap(),
            repo.uri("x.md")
        );
    }

    #[test]
    fn nearest_git_root_wins() {
        let repo = GitRepoFixture::new();
        let inner = repo.subdir("vendor/inner");
        std::fs::create_dir(inner.join(".git")).unwrap();
        let deeper = repo.subdir("vendor/inner/lib");
        assert_eq!(find_git_root(&deeper), Some(inner));
    }

    #[test]
    fn missing_git_root_is_fatal() {
        let dir = plain_dir();
        let result = resolve_uri("@gitroot/x.md", dir.path());
        assert!(matches!(result, Err(ArtifactError::GitRootNotFound { .. })));
    }

    #[test]
    fn working_dir_fixed_returns_itself() {
        let wd = WorkingDir::Fixed(PathBuf::from("/some/where"));
        assert_eq!(wd.current().unwrap(), PathBuf::from("/some/where"));
        assert!(WorkingDir::Process.current().unwrap().is_absolute());
    }

    #[test]
    fn is_gitroot_uri_checks_prefix() {
        assert!(is_gitroot_uri("@gitroot/a"));
        assert!(!is_gitroot_uri("a/@gitroot/b"));
    }
}
