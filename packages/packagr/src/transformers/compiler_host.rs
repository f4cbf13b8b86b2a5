// Compiler Host
//
// Abstraction for the compilation host environment.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use ng_packagr_resources::resource::normalize_path;

use crate::program::RewrittenSources;

/// Module file candidates tried for a relative specifier, in order.
const MODULE_SUFFIXES: &[&str] = &[".ts", ".tsx", ".d.ts", "/index.ts"];

/// Compilation host interface.
pub trait CompilerHost {
    /// Read a file.
    fn read_file(&self, path: &Path) -> Option<String>;

    /// Write a file, creating parent directories as needed.
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// Get current directory.
    fn current_directory(&self) -> PathBuf;

    /// Resolve a module specifier imported from `containing_file`.
    ///
    /// Only relative specifiers resolve; bare specifiers name external packages and
    /// yield `None`.
    fn resolve_module_name(&self, module_name: &str, containing_file: &Path) -> Option<PathBuf> {
        if !module_name.starts_with('.') {
            return None;
        }
        let dir = containing_file.parent().unwrap_or_else(|| Path::new("."));
        let base = normalize_path(&dir.join(module_name));

        if has_source_extension(&base) && self.file_exists(&base) {
            return Some(base);
        }
        let base = base.to_string_lossy();
        MODULE_SUFFIXES
            .iter()
            .map(|suffix| PathBuf::from(format!("{}{}", base.trim_end_matches('/'), suffix)))
            .find(|candidate| self.file_exists(candidate))
    }
}

fn has_source_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("ts") | Some("tsx")
    )
}

/// Host backed by the real file system.
#[derive(Debug, Clone)]
pub struct FsCompilerHost {
    current_dir: PathBuf,
}

impl FsCompilerHost {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: current_dir.into(),
        }
    }
}

impl CompilerHost for FsCompilerHost {
    fn read_file(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_directory(&self) -> PathBuf {
        self.current_dir.clone()
    }
}

/// In-memory compiler host for testing.
pub struct InMemoryCompilerHost {
    files: Mutex<HashMap<PathBuf, String>>,
    current_dir: PathBuf,
}

impl InMemoryCompilerHost {
    pub fn new(current_dir: impl Into<PathBuf>) -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            current_dir: current_dir.into(),
        }
    }

    /// Add a file.
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.into(), content.into());
        }
    }
}

impl CompilerHost for InMemoryCompilerHost {
    fn read_file(&self, path: &Path) -> Option<String> {
        self.files.lock().ok()?.get(path).cloned()
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "host poisoned"))?;
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.files
            .lock()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }

    fn current_directory(&self) -> PathBuf {
        self.current_dir.clone()
    }
}

/// Serves rewritten units in place of the wrapped host's files.
///
/// Every read first consults the override table; files not in it, writes and module
/// resolution go to the wrapped host.
pub struct OverlayCompilerHost<'a> {
    inner: &'a dyn CompilerHost,
    overrides: &'a RewrittenSources,
}

impl<'a> OverlayCompilerHost<'a> {
    pub fn new(inner: &'a dyn CompilerHost, overrides: &'a RewrittenSources) -> Self {
        Self { inner, overrides }
    }
}

impl CompilerHost for OverlayCompilerHost<'_> {
    fn read_file(&self, path: &Path) -> Option<String> {
        match self.overrides.get(path) {
            Some(unit) => Some(unit.text().to_string()),
            None => self.inner.read_file(path),
        }
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        self.inner.write_file(path, content)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.overrides.contains(path) || self.inner.file_exists(path)
    }

    fn current_directory(&self) -> PathBuf {
        self.inner.current_directory()
    }

    fn resolve_module_name(&self, module_name: &str, containing_file: &Path) -> Option<PathBuf> {
        self.inner.resolve_module_name(module_name, containing_file)
    }
}
