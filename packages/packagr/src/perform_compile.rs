//! Perform Compile
//!
//! Builds one package: prepares the configuration, discovers and rewrites the sources,
//! and runs the downstream compiler over the rewritten program.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ng_packagr_resources::{
    FsTemplateResolver, Logger, StylesheetPipeline, StylesheetRenderer, TemplateResolver,
    TracingLogger,
};

use crate::config::{prepare_configuration, PackageDescriptor};
use crate::error::{BuildError, CompilationError};
use crate::inline::{AnnotationRewriter, SymbolResolution};
use crate::program::discover_sources;
use crate::transformers::api::{AotCompiler, DiagnosticCategory, EmitResult, Program};
use crate::transformers::compiler_host::{CompilerHost, FsCompilerHost, OverlayCompilerHost};
use crate::transpile::TranspileCompiler;

/// Build progress. Stages are passed in order; a failure ends the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildStage {
    ConfigPrepared,
    SourcesDiscovered,
    SourcesRewritten,
    ProgramConstructed,
    CompilationPerformed,
    Done,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::ConfigPrepared => "ConfigPrepared",
            BuildStage::SourcesDiscovered => "SourcesDiscovered",
            BuildStage::SourcesRewritten => "SourcesRewritten",
            BuildStage::ProgramConstructed => "ProgramConstructed",
            BuildStage::CompilationPerformed => "CompilationPerformed",
            BuildStage::Done => "Done",
        };
        f.write_str(name)
    }
}

pub struct PackageBuilder {
    logger: Arc<dyn Logger>,
    compiler: Arc<dyn AotCompiler + Send + Sync>,
    host: Option<Arc<dyn CompilerHost + Send + Sync>>,
    templates: Option<Arc<dyn TemplateResolver>>,
    stylesheets: Option<Arc<dyn StylesheetRenderer>>,
    resolution: SymbolResolution,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self {
            logger: Arc::new(TracingLogger::default()),
            compiler: Arc::new(TranspileCompiler::new()),
            host: None,
            templates: None,
            stylesheets: None,
            resolution: SymbolResolution::default(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_compiler(mut self, compiler: Arc<dyn AotCompiler + Send + Sync>) -> Self {
        self.compiler = compiler;
        self
    }

    /// Host the sources are read from and the output is written to. Defaults to the
    /// file system.
    pub fn with_host(mut self, host: Arc<dyn CompilerHost + Send + Sync>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_template_resolver(mut self, templates: Arc<dyn TemplateResolver>) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Defaults to a [`StylesheetPipeline`] rooted at the package base path.
    pub fn with_stylesheet_renderer(mut self, stylesheets: Arc<dyn StylesheetRenderer>) -> Self {
        self.stylesheets = Some(stylesheets);
        self
    }

    pub fn with_resolution(mut self, resolution: SymbolResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Compile the package at `base_path` and return the path of its flat-module file.
    pub async fn build_package(
        &self,
        descriptor: &PackageDescriptor,
        base_path: &Path,
    ) -> Result<PathBuf, BuildError> {
        self.logger
            .debug(&format!("ngc: {} ({})", descriptor.entry_file, descriptor.full_package_name));

        let config = prepare_configuration(descriptor, base_path)?;
        stage(BuildStage::ConfigPrepared);

        let host: Arc<dyn CompilerHost + Send + Sync> = match &self.host {
            Some(host) => Arc::clone(host),
            None => Arc::new(FsCompilerHost::new(base_path)),
        };
        let units = discover_sources(host.as_ref(), &config.root_names)?;
        tracing::debug!("discovered {} source file(s)", units.len());
        stage(BuildStage::SourcesDiscovered);

        let rewriter = AnnotationRewriter::new(
            self.template_resolver(),
            self.stylesheet_renderer(base_path),
        )
        .with_resolution(self.resolution);
        let sources = rewriter.rewrite_program(&units).await?;
        stage(BuildStage::SourcesRewritten);

        let overlay = OverlayCompilerHost::new(host.as_ref(), &sources);
        let program = Program {
            root_names: config.root_names.clone(),
            source_files: sources.paths().map(Path::to_path_buf).collect(),
            options: config.options.clone(),
            emit_flags: config.emit_flags,
        };
        stage(BuildStage::ProgramConstructed);

        let result = self.compiler.perform_compilation(&program, &overlay);
        self.report(&result);
        if let Some(err) = CompilationError::from_diagnostics(&result.diagnostics) {
            return Err(err.into());
        }
        stage(BuildStage::CompilationPerformed);

        let out = config.flat_module_out_path();
        stage(BuildStage::Done);
        Ok(out)
    }

    fn template_resolver(&self) -> Arc<dyn TemplateResolver> {
        match &self.templates {
            Some(templates) => Arc::clone(templates),
            None => Arc::new(FsTemplateResolver::new()),
        }
    }

    fn stylesheet_renderer(&self, base_path: &Path) -> Arc<dyn StylesheetRenderer> {
        match &self.stylesheets {
            Some(stylesheets) => Arc::clone(stylesheets),
            None => Arc::new(StylesheetPipeline::new(base_path, Arc::clone(&self.logger))),
        }
    }

    fn report(&self, result: &EmitResult) {
        for diagnostic in &result.diagnostics {
            match diagnostic.category {
                DiagnosticCategory::Error => self.logger.error(&diagnostic.to_string()),
                DiagnosticCategory::Warning => self.logger.warn(&diagnostic.to_string()),
                DiagnosticCategory::Suggestion | DiagnosticCategory::Message => {
                    self.logger.info(&diagnostic.to_string())
                }
            }
        }
    }
}

impl Default for PackageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn stage(stage: BuildStage) {
    tracing::info!(%stage, "build stage reached");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(BuildStage::ConfigPrepared < BuildStage::SourcesDiscovered);
        assert!(BuildStage::CompilationPerformed < BuildStage::Done);
        assert_eq!(BuildStage::SourcesRewritten.to_string(), "SourcesRewritten");
    }
}
