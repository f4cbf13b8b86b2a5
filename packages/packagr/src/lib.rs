#![deny(clippy::all)]

//! Library packaging: component metadata inlining and compilation.
//!
//! Sources reachable from a package entry file are discovered, every `@Component`
//! decorator has its `templateUrl`/`styleUrls` replaced by inlined `template`/`styles`,
//! and the rewritten program is handed to the downstream compiler through a host that
//! serves the rewritten text in place of the files on disk.

pub use ng_packagr_resources as resources;

pub mod config;
pub mod error;
pub mod inline;
pub mod perform_compile;
pub mod program;
pub mod transformers;
pub mod transpile;

pub use config::{CompilerConfiguration, PackageDescriptor};
pub use error::{BuildError, CompilationError, InlineCause, MetadataInlineError, MetadataKey};
pub use inline::{AnnotationRewriter, ComponentMarker, ImportBindings, LexicalResolver, SymbolResolver};
pub use perform_compile::{BuildStage, PackageBuilder};
pub use program::{CompilationUnit, RewrittenSources};
pub use transformers::api::AotCompiler;
pub use transpile::TranspileCompiler;

/// Packager version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
