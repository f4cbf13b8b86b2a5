// Transformers API
//
// Contract between the packager and the downstream compiler.

use std::fmt;
use std::path::PathBuf;

use bitflags::bitflags;
use indexmap::IndexMap;
use serde_json::Value;

use super::compiler_host::CompilerHost;

/// Compiler options for the downstream compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilerOptions {
    /// Base URL for resolving non-relative module specifiers.
    pub base_url: Option<PathBuf>,
    /// Base path of the package.
    pub base_path: Option<PathBuf>,
    /// Output directory for compiled files.
    pub out_dir: Option<PathBuf>,
    /// Output directory for generated factories.
    pub gen_dir: Option<PathBuf>,
    /// Module id written into the flat-module metadata (`importAs`).
    pub flat_module_id: Option<String>,
    /// File name of the flat-module index, relative to `out_dir`.
    pub flat_module_out_file: Option<String>,
    pub declaration: bool,
    pub source_map: bool,
    pub skip_template_codegen: bool,
    pub strict_metadata_emit: bool,
    /// Every other option of the configuration document, keyed as in tsconfig.
    pub extra: IndexMap<String, Value>,
}

bitflags! {
    /// Artifacts the downstream compiler writes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EmitFlags: u32 {
        const DTS = 1 << 0;
        const JS = 1 << 1;
        const METADATA = 1 << 2;
        const DEFAULT = Self::DTS.bits() | Self::JS.bits() | Self::METADATA.bits();
    }
}

impl Default for EmitFlags {
    fn default() -> Self {
        EmitFlags::DEFAULT
    }
}

/// Diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: i32,
    pub message: String,
    pub file: Option<PathBuf>,
    /// Byte offset into `file`.
    pub start: Option<usize>,
    pub length: Option<usize>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticCategory::Warning, message)
    }

    fn new(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            code: -1,
            message: message.into(),
            file: None,
            start: None,
            length: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_span(mut self, start: usize, length: usize) -> Self {
        self.start = Some(start);
        self.length = Some(length);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category = match self.category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        match (&self.file, self.start) {
            (Some(file), Some(start)) => {
                write!(f, "{}: {} ({}:{})", category, self.message, file.display(), start)
            }
            (Some(file), None) => write!(f, "{}: {} ({})", category, self.message, file.display()),
            _ => write!(f, "{}: {}", category, self.message),
        }
    }
}

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

/// The program handed to the downstream compiler.
#[derive(Debug, Clone, Default)]
pub struct Program {
    /// Entry files.
    pub root_names: Vec<PathBuf>,
    /// Every source file of the program, in discovery order.
    pub source_files: Vec<PathBuf>,
    pub options: CompilerOptions,
    pub emit_flags: EmitFlags,
}

/// Result of emit operation.
#[derive(Debug, Clone, Default)]
pub struct EmitResult {
    /// Whether emit was skipped.
    pub emit_skipped: bool,
    /// Diagnostics from emit.
    pub diagnostics: Vec<Diagnostic>,
    /// Emitted files.
    pub emitted_files: Vec<PathBuf>,
}

impl EmitResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }
}

/// A compiler that emits a program read through `host`.
///
/// Sources are always read through the host so rewritten units take the place of the
/// files on disk.
pub trait AotCompiler {
    fn perform_compilation(&self, program: &Program, host: &dyn CompilerHost) -> EmitResult;
}
