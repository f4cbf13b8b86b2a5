// Stylesheet Formats
//
// Extension-based classification of stylesheet files.

use std::path::{Path, PathBuf};

/// Stylesheet syntax, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFormat {
    /// `.css` and any unrecognized extension.
    Css,
    /// `.scss` and `.sass`.
    Sass,
    /// `.less`.
    Less,
    /// `.styl` and `.stylus`.
    Stylus,
}

impl StyleFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "scss" | "sass" => StyleFormat::Sass,
            "less" => StyleFormat::Less,
            "styl" | "stylus" => StyleFormat::Stylus,
            _ => StyleFormat::Css,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(StyleFormat::Css)
    }
}

/// One stylesheet to render.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// Absolute path of the stylesheet.
    pub path: PathBuf,
    /// Root of the project, where `node_modules` lives.
    pub project_root: PathBuf,
    pub format: StyleFormat,
}

impl RenderRequest {
    pub fn new(path: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = StyleFormat::from_path(&path);
        Self {
            path,
            project_root: project_root.into(),
            format,
        }
    }

    /// Directory containing the stylesheet.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_extensions() {
        assert_eq!(StyleFormat::from_path(Path::new("a.scss")), StyleFormat::Sass);
        assert_eq!(StyleFormat::from_path(Path::new("a.sass")), StyleFormat::Sass);
        assert_eq!(StyleFormat::from_path(Path::new("a.less")), StyleFormat::Less);
        assert_eq!(StyleFormat::from_path(Path::new("a.styl")), StyleFormat::Stylus);
        assert_eq!(StyleFormat::from_path(Path::new("a.stylus")), StyleFormat::Stylus);
        assert_eq!(StyleFormat::from_path(Path::new("a.css")), StyleFormat::Css);
        assert_eq!(StyleFormat::from_path(Path::new("a.pcss")), StyleFormat::Css);
        assert_eq!(StyleFormat::from_path(Path::new("noext")), StyleFormat::Css);
    }

    #[test]
    fn request_derives_format() {
        let request = RenderRequest::new("/lib/src/theme.SCSS", "/lib");
        assert_eq!(request.format, StyleFormat::Sass);
        assert_eq!(request.dir(), Path::new("/lib/src"));
    }
}
