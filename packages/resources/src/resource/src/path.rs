// Resource Paths
//
// Lexical path helpers for resource URLs declared in component metadata.

use std::path::{Component, Path, PathBuf};

/// Normalize `.` and `..` segments without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve `url` against the directory containing `declaring_file`.
///
/// Absolute URLs are kept as they are.
pub fn resolve_resource_path(declaring_file: &Path, url: &str) -> PathBuf {
    let dir = declaring_file.parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&dir.join(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_to_declaring_directory() {
        let resolved = resolve_resource_path(Path::new("/my/foo.component.ts"), "./foo.component.html");
        assert_eq!(resolved, PathBuf::from("/my/foo.component.html"));
    }

    #[test]
    fn resolves_parent_segments() {
        let resolved = resolve_resource_path(Path::new("/lib/src/a/b.ts"), "../shared/../c.html");
        assert_eq!(resolved, PathBuf::from("/lib/src/c.html"));
    }

    #[test]
    fn keeps_absolute_urls() {
        let resolved = resolve_resource_path(Path::new("/lib/a.ts"), "/assets/t.html");
        assert_eq!(resolved, PathBuf::from("/assets/t.html"));
    }

    #[test]
    fn parent_of_root_stays_at_root() {
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("../a/./b")), PathBuf::from("../a/b"));
    }
}
