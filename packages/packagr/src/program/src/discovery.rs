// Source Discovery
//
// Breadth-first walk from the root files over relative imports and re-exports.

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

use thiserror::Error;

use crate::transformers::compiler_host::CompilerHost;

use super::unit::{CompilationUnit, SyntaxError};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Cannot read source file {}", .path.display())]
    NotFound { path: PathBuf },
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Every unit reachable from `root_names`, in discovery order.
///
/// Bare specifiers name external packages and are not followed. A relative specifier
/// the host cannot resolve is skipped; the downstream compiler reports it.
pub fn discover_sources(
    host: &dyn CompilerHost,
    root_names: &[PathBuf],
) -> Result<Vec<CompilationUnit>, DiscoveryError> {
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut queue: VecDeque<PathBuf> = root_names.iter().cloned().collect();
    let mut units = Vec::new();

    while let Some(path) = queue.pop_front() {
        if !visited.insert(path.clone()) {
            continue;
        }

        let text = host
            .read_file(&path)
            .ok_or_else(|| DiscoveryError::NotFound { path: path.clone() })?;
        let unit = CompilationUnit::new(&path, text)?;
        tracing::debug!("discovered {}", path.display());

        for specifier in unit.module_specifiers() {
            if !specifier.starts_with('.') {
                continue;
            }
            match host.resolve_module_name(&specifier, &path) {
                Some(resolved) if !visited.contains(&resolved) => queue.push_back(resolved),
                Some(_) => {}
                None => tracing::warn!("cannot resolve '{}' from {}", specifier, path.display()),
            }
        }

        units.push(unit);
    }

    Ok(units)
}
