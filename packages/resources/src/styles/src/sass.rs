//! Sass/SCSS rendering using the grass crate.
//!
//! Imports prefixed with `~` (`@import '~some-lib/theme'`) name a package in the
//! project's `node_modules` instead of a path relative to the importing stylesheet.
//! grass resolves imports through its `Fs` abstraction, so `TildeFs` maps such paths
//! before touching the disk.

use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use grass::{Options, OutputStyle};

use super::format::RenderRequest;
use super::renderer::StyleRenderer;

/// Map a path containing a `~package` segment onto `<project_root>/node_modules/package/...`.
///
/// grass joins an import URL onto the importing file's directory before probing the
/// file system, so the `~` segment can appear anywhere below the project root. Segments
/// of the project root itself are never mapped. Paths without such a segment are
/// returned unchanged.
pub fn resolve_tilde_import(path: &Path, project_root: &Path) -> PathBuf {
    let relative = path.strip_prefix(project_root).unwrap_or(path);
    let components: Vec<Component<'_>> = relative.components().collect();
    let tilde = components.iter().position(|c| match c {
        Component::Normal(segment) => segment.to_str().is_some_and(|s| s.starts_with('~')),
        _ => false,
    });

    let Some(index) = tilde else {
        return path.to_path_buf();
    };

    let mut resolved = project_root.join("node_modules");
    if let Component::Normal(segment) = components[index] {
        let package = segment.to_str().unwrap_or_default().trim_start_matches('~');
        if !package.is_empty() {
            resolved.push(package);
        }
    }
    for component in &components[index + 1..] {
        resolved.push(component.as_os_str());
    }
    resolved
}

/// `grass::Fs` adapter applying the `~` import rule.
#[derive(Debug)]
struct TildeFs {
    project_root: PathBuf,
}

impl TildeFs {
    /// Existing files are read as they are; only missing paths go through the `~` rule.
    fn map(&self, path: &Path) -> PathBuf {
        if path.exists() {
            return path.to_path_buf();
        }
        resolve_tilde_import(path, &self.project_root)
    }
}

impl grass::Fs for TildeFs {
    fn is_dir(&self, path: &Path) -> bool {
        self.map(path).is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        self.map(path).is_file()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(self.map(path))
    }

    // The mapped path becomes the current import path, so relative imports inside a
    // package resolve against the package directory.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(self.map(path))
    }
}

/// Renders `.scss` and `.sass` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct SassRenderer;

impl SassRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StyleRenderer for SassRenderer {
    fn name(&self) -> &'static str {
        "sass"
    }

    async fn render(&self, request: &RenderRequest, _raw: &str) -> anyhow::Result<String> {
        let path = request.path.clone();
        let project_root = request.project_root.clone();

        tokio::task::spawn_blocking(move || {
            let load_paths = [project_root.clone(), project_root.join("node_modules")];
            let fs = TildeFs { project_root };
            let options = Options::default()
                .fs(&fs)
                .load_paths(&load_paths)
                .style(OutputStyle::Expanded);

            grass::from_path(&path, &options).map_err(|e| anyhow::anyhow!(e.to_string()))
        })
        .await
        .context("sass renderer task failed")?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_tilde_relative_to_importer() {
        let resolved = resolve_tilde_import(
            Path::new("/work/lib/src/~some-lib/x.scss"),
            Path::new("/work/lib"),
        );
        assert_eq!(resolved, PathBuf::from("/work/lib/node_modules/some-lib/x.scss"));
    }

    #[test]
    fn maps_bare_tilde_url() {
        let resolved = resolve_tilde_import(Path::new("~some-lib/x.scss"), Path::new("/root"));
        assert_eq!(resolved, PathBuf::from("/root/node_modules/some-lib/x.scss"));
    }

    #[test]
    fn maps_scoped_packages() {
        let resolved = resolve_tilde_import(
            Path::new("/root/src/~@scope/pkg/_mixins.scss"),
            Path::new("/root"),
        );
        assert_eq!(
            resolved,
            PathBuf::from("/root/node_modules/@scope/pkg/_mixins.scss")
        );
    }

    #[test]
    fn leaves_plain_paths_alone() {
        let path = Path::new("/root/src/theme/_vars.scss");
        assert_eq!(resolve_tilde_import(path, Path::new("/root")), path);
    }

    #[test]
    fn leaves_tilde_segments_of_project_root_alone() {
        let root = Path::new("/home/~work/lib");
        let path = root.join("src/theme/_vars.scss");
        assert_eq!(resolve_tilde_import(&path, root), path);

        let resolved = resolve_tilde_import(&root.join("src/~some-lib/x.scss"), root);
        assert_eq!(resolved, root.join("node_modules/some-lib/x.scss"));
    }

    #[test]
    fn ignores_tilde_inside_segment() {
        let path = Path::new("/root/src/a~b.scss");
        assert_eq!(resolve_tilde_import(path, Path::new("/root")), path);
    }
}
