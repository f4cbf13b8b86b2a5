// Transpile Compiler
//
// In-process downstream compiler: strips TypeScript syntax with oxc and writes one
// JavaScript module per source plus the flat-module index and its metadata.

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer};
use serde_json::json;

use crate::transformers::api::{AotCompiler, Diagnostic, EmitFlags, EmitResult, Program};
use crate::transformers::compiler_host::CompilerHost;
use crate::transformers::util::{is_dts_file, module_specifier, relative_to, to_js_path};

/// Version of the flat-module metadata format.
const METADATA_VERSION: u32 = 4;

#[derive(Default)]
pub struct TranspileCompiler {
    transform_options: TransformOptions,
}

impl TranspileCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transform_options(transform_options: TransformOptions) -> Self {
        Self { transform_options }
    }

    /// JavaScript for one TypeScript source.
    fn transpile(&self, path: &Path, source: &str) -> Result<String, Vec<Diagnostic>> {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::ts());
        let mut parse_result = Parser::new(&allocator, source, source_type).parse();

        if !parse_result.errors.is_empty() {
            return Err(to_diagnostics(path, &parse_result.errors));
        }

        let semantic = SemanticBuilder::new()
            .with_excess_capacity(0.0)
            .build(&parse_result.program);
        let transformer = Transformer::new(&allocator, path, &self.transform_options);
        let transformed =
            transformer.build_with_scoping(semantic.semantic.into_scoping(), &mut parse_result.program);
        if !transformed.errors.is_empty() {
            return Err(to_diagnostics(path, &transformed.errors));
        }

        Ok(Codegen::new().build(&parse_result.program).code)
    }

    fn output_path(&self, program: &Program, source: &Path) -> PathBuf {
        let out_dir = program.options.out_dir.clone().unwrap_or_default();
        let relative = program
            .options
            .base_path
            .as_deref()
            .and_then(|base| relative_to(source, base))
            .or_else(|| source.file_name().map(PathBuf::from))
            .unwrap_or_else(|| source.to_path_buf());
        to_js_path(&out_dir.join(relative))
    }

    fn emit_flat_module(&self, program: &Program, host: &dyn CompilerHost, result: &mut EmitResult) {
        let (Some(out_dir), Some(flat_file)) = (
            program.options.out_dir.as_deref(),
            program.options.flat_module_out_file.as_deref(),
        ) else {
            return;
        };
        let Some(entry) = program.root_names.first() else {
            return;
        };

        let index_path = out_dir.join(flat_file);
        if program.emit_flags.contains(EmitFlags::JS) {
            let index_dir = index_path.parent().unwrap_or(out_dir);
            let specifier = module_specifier(index_dir, &self.output_path(program, entry));
            let content = format!("export * from '{}';\n", specifier);
            write(host, &index_path, &content, result);
        }

        if program.emit_flags.contains(EmitFlags::METADATA) {
            let metadata = json!({
                "__symbolic": "module",
                "version": METADATA_VERSION,
                "metadata": {},
                "origins": {},
                "importAs": program.options.flat_module_id,
            });
            let metadata_path = index_path.with_extension("metadata.json");
            match serde_json::to_string_pretty(&metadata) {
                Ok(content) => write(host, &metadata_path, &content, result),
                Err(err) => result
                    .diagnostics
                    .push(Diagnostic::error(err.to_string()).with_file(&metadata_path)),
            }
        }
    }
}

impl AotCompiler for TranspileCompiler {
    /// Every source is transpiled before anything is written, so a program with errors
    /// leaves the output directory untouched.
    fn perform_compilation(&self, program: &Program, host: &dyn CompilerHost) -> EmitResult {
        let mut result = EmitResult::default();
        let mut outputs = Vec::new();

        if program.emit_flags.contains(EmitFlags::JS) {
            for source in &program.source_files {
                if is_dts_file(source) {
                    continue;
                }
                let Some(text) = host.read_file(source) else {
                    result
                        .diagnostics
                        .push(Diagnostic::error("Cannot read source file").with_file(source));
                    continue;
                };
                match self.transpile(source, &text) {
                    Ok(js) => outputs.push((self.output_path(program, source), js)),
                    Err(diagnostics) => result.diagnostics.extend(diagnostics),
                }
            }
        }

        if result.has_errors() {
            result.emit_skipped = true;
            return result;
        }

        for (path, js) in &outputs {
            write(host, path, js, &mut result);
        }
        self.emit_flat_module(program, host, &mut result);
        result
    }
}

fn write(host: &dyn CompilerHost, path: &Path, content: &str, result: &mut EmitResult) {
    match host.write_file(path, content) {
        Ok(()) => {
            tracing::debug!("emitted {}", path.display());
            result.emitted_files.push(path.to_path_buf());
        }
        Err(err) => result
            .diagnostics
            .push(Diagnostic::error(format!("Cannot write file: {}", err)).with_file(path)),
    }
}

fn to_diagnostics(path: &Path, errors: &[OxcDiagnostic]) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|error| {
            let diagnostic = Diagnostic::error(error.to_string()).with_file(path);
            match error.labels.as_ref().and_then(|labels| labels.first()) {
                Some(label) => diagnostic.with_span(label.offset(), label.len()),
                None => diagnostic,
            }
        })
        .collect()
}
