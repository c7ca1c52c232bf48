//! Re-rooting of paths
//!
//! `relate` moves a path to another directory while keeping its basename.
//! Relations are either relative (`../out`, `./sub`, `drafts`) or anchored at
//! the repository root (`@gitroot/out`).

/// Alias prefix anchoring a path at the nearest git repository root
pub const GITROOT_ALIAS: &str = "@gitroot/";

/// Re-root `path` according to `relation`
///
/// - empty relation: `path` unchanged
/// - `@gitroot/<dir>`: the original directory is discarded and the basename
///   is placed under `@gitroot/<dir>/`
/// - anything else: joined onto the original directory and normalized
#[must_use]
pub fn relate(path: &str, relation: &str) -> String {
    let relation = relation.trim();
    if relation.is_empty() {
        return path.to_string();
    }

    let (dir, basename) = split_basename(path);

    if let Some(rest) = gitroot_remainder(relation) {
        let rest = rest.trim_end_matches('/');
        return if rest.is_empty() {
            format!("{GITROOT_ALIAS}{basename}")
        } else {
            format!("{GITROOT_ALIAS}{rest}/{basename}")
        };
    }

    let dir = join_normalized(dir, relation);
    if dir.is_empty() {
        basename.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{basename}")
    } else {
        format!("{dir}/{basename}")
    }
}

/// Join `relative` onto `base` and normalize
///
/// `..` pops the previous segment, or accumulates as a leading `../` when
/// nothing is left to pop; absolute paths stop at `/`. `.` and empty
/// segments vanish. An empty result means "current directory".
#[must_use]
pub fn join_normalized(base: &str, relative: &str) -> String {
    let absolute = base.starts_with('/');
    let mut stack: Vec<&str> = Vec::new();

    for segment in base.split('/').chain(relative.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.last().is_some_and(|s| *s != "..") {
                    stack.pop();
                } else if !absolute {
                    stack.push("..");
                }
            }
            name => stack.push(name),
        }
    }

    let joined = stack.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Split into `(directory, basename)` at the last `/`
#[must_use]
pub fn split_basename(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("", path),
    }
}

fn gitroot_remainder(relation: &str) -> Option<&str> {
    if relation == GITROOT_ALIAS.trim_end_matches('/') {
        return Some("");
    }
    relation.strip_prefix(GITROOT_ALIAS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relate_empty_relation_is_identity() {
        assert_eq!(relate("a/b/x.txt", ""), "a/b/x.txt");
        assert_eq!(relate("a/b/x.txt", "   "), "a/b/x.txt");
    }

    #[test]
    fn relate_parent_directory() {
        assert_eq!(relate("a/b/x.txt", "../"), "a/x.txt");
        assert_eq!(relate("a/b/x.txt", "../.."), "x.txt");
        assert_eq!(relate("a/b/x.txt", "../../.."), "../x.txt");
    }

    #[test]
    fn relate_bare_filename_accumulates_parent() {
        assert_eq!(relate("filename", "../"), "../filename");
        assert_eq!(relate("filename", "../../"), "../../filename");
    }

    #[test]
    fn relate_subdirectory_and_current() {
        assert_eq!(relate("a/b/x.txt", "sub"), "a/b/sub/x.txt");
        assert_eq!(relate("a/b/x.txt", "./sub/"), "a/b/sub/x.txt");
        assert_eq!(relate("a/b/x.txt", "."), "a/b/x.txt");
        assert_eq!(relate("a/b/x.txt", "../sibling"), "a/sibling/x.txt");
    }

    #[test]
    fn relate_absolute_paths_stop_at_root() {
        assert_eq!(relate("/a/x.txt", "../../.."), "/x.txt");
        assert_eq!(relate("/x.txt", "sub"), "/sub/x.txt");
    }

    #[test]
    fn relate_gitroot_discards_original_directory() {
        assert_eq!(relate("deep/nested/dir/x.md", "@gitroot/out"), "@gitroot/out/x.md");
        assert_eq!(relate("x.md", "@gitroot/out/"), "@gitroot/out/x.md");
        assert_eq!(relate("a/x.md", "@gitroot/"), "@gitroot/x.md");
        assert_eq!(relate("a/x.md", "@gitroot"), "@gitroot/x.md");
    }

    #[test]
    fn join_normalized_cases() {
        assert_eq!(join_normalized("a/b", "./c/../d"), "a/b/d");
        assert_eq!(join_normalized("", ".."), "..");
        assert_eq!(join_normalized("a", ".."), "");
        assert_eq!(join_normalized("../a", "../.."), "../..");
        assert_eq!(join_normalized("/", ".rhachet/x"), "/.rhachet/x");
    }

    #[test]
    fn split_basename_cases() {
        assert_eq!(split_basename("a/b/c.md"), ("a/b", "c.md"));
        assert_eq!(split_basename("c.md"), ("", "c.md"));
        assert_eq!(split_basename("/c.md"), ("/", "c.md"));
    }
}
