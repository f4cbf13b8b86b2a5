// Packaging Errors
//
// Failures of the inlining pass and of the build as a whole.

use std::fmt;
use std::path::PathBuf;

use ng_packagr_resources::{ResourceNotFoundError, StylesheetError};
use thiserror::Error;

use crate::config::ConfigError;
use crate::perform_compile::BuildStage;
use crate::program::DiscoveryError;
use crate::transformers::api::{Diagnostic, DiagnosticCategory};

/// The metadata entry an inlining failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKey {
    TemplateUrl,
    StyleUrls,
    /// The unit text itself (parse failures).
    Source,
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataKey::TemplateUrl => f.write_str("templateUrl"),
            MetadataKey::StyleUrls => f.write_str("styleUrls"),
            MetadataKey::Source => f.write_str("source"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InlineCause {
    #[error(transparent)]
    Template(#[from] ResourceNotFoundError),
    #[error(transparent)]
    Stylesheet(#[from] StylesheetError),
    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
    #[error("syntax error: {0}")]
    Parse(String),
}

/// A component annotation whose resources could not be inlined.
///
/// `line` and `column` are 1-based and point at the offending property.
#[derive(Debug, Error)]
#[error("Cannot inline {property} at {}:{line}:{column}: {cause}", .file.display())]
pub struct MetadataInlineError {
    pub file: PathBuf,
    pub property: MetadataKey,
    pub line: usize,
    pub column: usize,
    #[source]
    pub cause: InlineCause,
}

/// Error diagnostics reported by the downstream compiler.
#[derive(Debug, Error)]
#[error("Compilation failed with {} error(s){}", .diagnostics.len(), first_message(.diagnostics))]
pub struct CompilationError {
    pub diagnostics: Vec<Diagnostic>,
}

impl CompilationError {
    /// `None` if `diagnostics` holds no error.
    pub fn from_diagnostics(diagnostics: &[Diagnostic]) -> Option<Self> {
        let errors: Vec<Diagnostic> = diagnostics
            .iter()
            .filter(|d| d.category == DiagnosticCategory::Error)
            .cloned()
            .collect();
        if errors.is_empty() {
            None
        } else {
            Some(Self {
                diagnostics: errors,
            })
        }
    }
}

fn first_message(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// Build failure, tagged with the stage that could not be reached.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{}: {0}", BuildStage::ConfigPrepared)]
    Config(#[from] ConfigError),
    #[error("{}: {0}", BuildStage::SourcesDiscovered)]
    Discovery(#[from] DiscoveryError),
    #[error("{}: {0}", BuildStage::SourcesRewritten)]
    Inline(#[from] MetadataInlineError),
    #[error("{}: {0}", BuildStage::CompilationPerformed)]
    Compilation(#[from] CompilationError),
}

impl BuildError {
    pub fn stage(&self) -> BuildStage {
        match self {
            BuildError::Config(_) => BuildStage::ConfigPrepared,
            BuildError::Discovery(_) => BuildStage::SourcesDiscovered,
            BuildError::Inline(_) => BuildStage::SourcesRewritten,
            BuildError::Compilation(_) => BuildStage::CompilationPerformed,
        }
    }
}
