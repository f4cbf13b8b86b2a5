// Transformer Utilities
//
// Path helpers for emitted files.

use std::path::{Component, Path, PathBuf};

/// `path` relative to `base`, or `None` if `path` is not under `base`.
pub fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).ok().map(Path::to_path_buf)
}

/// Check if file is a declaration file.
pub fn is_dts_file(path: &Path) -> bool {
    path.to_str().map_or(false, |p| p.ends_with(".d.ts"))
}

/// Replace the TypeScript extension of `path` with `.js`.
pub fn to_js_path(path: &Path) -> PathBuf {
    let mut out = path.to_path_buf();
    out.set_extension("js");
    out
}

/// Module specifier for `target` as imported from a file in `from_dir`, without extension.
pub fn module_specifier(from_dir: &Path, target: &Path) -> String {
    let target = target.with_extension("");
    let from: Vec<Component> = from_dir.components().collect();
    let to: Vec<Component> = target.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{}", joined)
    }
}
