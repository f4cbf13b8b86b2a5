// Rewritten Sources
//
// Override table consulted by the compiler host. Built once after rewriting and never
// modified.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::unit::CompilationUnit;

#[derive(Debug, Clone, Default)]
pub struct RewrittenSources {
    units: IndexMap<PathBuf, CompilationUnit>,
}

impl RewrittenSources {
    /// Keyed by unit path; insertion order is kept.
    pub fn from_units(units: impl IntoIterator<Item = CompilationUnit>) -> Self {
        Self {
            units: units
                .into_iter()
                .map(|unit| (unit.path().to_path_buf(), unit))
                .collect(),
        }
    }

    pub fn get(&self, path: &Path) -> Option<&CompilationUnit> {
        self.units.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.units.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.units.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompilationUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
