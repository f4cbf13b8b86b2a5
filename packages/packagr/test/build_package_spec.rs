//! Build Package Tests
//!
//! End-to-end builds: discovery, inlining and compilation of a library package.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ng_packagr::resources::{CapturingLogger, InMemoryTemplateResolver, LogLevel, NullLogger};
use ng_packagr::transformers::api::{AotCompiler, Diagnostic, EmitResult, Program};
use ng_packagr::transformers::compiler_host::{CompilerHost, InMemoryCompilerHost};
use ng_packagr::{BuildError, BuildStage, PackageBuilder, PackageDescriptor};

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn fixture(base: &Path) {
    write(&base.join(".browserslistrc"), "safari 12\n");
    write(
        &base.join("src/public_api.ts"),
        "export * from './lib/a.component';\n",
    );
    write(
        &base.join("src/lib/a.component.ts"),
        "import { Component } from '@angular/core';\n\
         \n\
         @Component({\n\
         \x20 selector: 'lib-a',\n\
         \x20 templateUrl: './a.component.html',\n\
         \x20 styleUrls: ['./a.component.scss', './b.css'],\n\
         })\n\
         export class AComponent {\n\
         \x20 title: string = 'a';\n\
         }\n",
    );
    write(&base.join("src/lib/a.component.html"), "<h1>{{ title }}</h1>\n");
    write(
        &base.join("src/lib/a.component.scss"),
        "$accent: red;\nh1 { color: $accent; }\n",
    );
    write(&base.join("src/lib/b.css"), ".b { user-select: none; }\n");
}

/// Records what it reads through the host and reports the given diagnostics.
#[derive(Default)]
struct RecordingCompiler {
    seen: Mutex<Vec<(PathBuf, String)>>,
    diagnostics: Vec<Diagnostic>,
}

impl AotCompiler for RecordingCompiler {
    fn perform_compilation(&self, program: &Program, host: &dyn CompilerHost) -> EmitResult {
        let mut seen = self.seen.lock().unwrap();
        for file in &program.source_files {
            seen.push((file.clone(), host.read_file(file).unwrap_or_default()));
        }
        EmitResult {
            diagnostics: self.diagnostics.clone(),
            ..EmitResult::default()
        }
    }
}

fn in_memory_host() -> Arc<InMemoryCompilerHost> {
    let host = InMemoryCompilerHost::new("/lib");
    host.add_file("/lib/src/public_api.ts", "export * from './a';\n");
    host.add_file(
        "/lib/src/a.ts",
        "import { Component as Cmp } from '@angular/core';\n\
         @Cmp({ templateUrl: './a.html' }) export class A {}\n",
    );
    Arc::new(host)
}

fn in_memory_templates() -> Arc<InMemoryTemplateResolver> {
    let mut templates = InMemoryTemplateResolver::new();
    templates.add("/lib/src/a.html", "<p>hi</p>");
    Arc::new(templates)
}

#[tokio::test]
async fn should_build_package_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    fixture(base);

    let logger = Arc::new(CapturingLogger::new());
    let out = PackageBuilder::new()
        .with_logger(logger.clone())
        .build_package(&PackageDescriptor::new("src/public_api.ts", "@my/lib"), base)
        .await
        .unwrap();

    assert_eq!(out, base.join(".ng_pkg_build").join("lib.js"));
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "export * from './src/public_api';\n"
    );

    let metadata = std::fs::read_to_string(base.join(".ng_pkg_build/lib.metadata.json")).unwrap();
    assert!(metadata.contains("\"importAs\": \"@my/lib\""));

    let js = std::fs::read_to_string(base.join(".ng_pkg_build/src/lib/a.component.js")).unwrap();
    assert!(js.contains("template:"));
    assert!(js.contains("<h1>{{ title }}</h1>"));
    assert!(js.contains("color: red"));
    assert!(js.contains("-webkit-user-select"));
    assert!(!js.contains("templateUrl"));
    assert!(!js.contains("styleUrls"));
    assert!(logger.messages(LogLevel::Error).is_empty());

    // Sources on disk are left alone.
    let source = std::fs::read_to_string(base.join("src/lib/a.component.ts")).unwrap();
    assert!(source.contains("templateUrl"));
}

#[tokio::test]
async fn should_stop_before_compilation_when_template_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    fixture(base);
    std::fs::remove_file(base.join("src/lib/a.component.html")).unwrap();

    let err = PackageBuilder::new()
        .with_logger(Arc::new(NullLogger))
        .build_package(&PackageDescriptor::new("src/public_api.ts", "@my/lib"), base)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), BuildStage::SourcesRewritten);
    match err {
        BuildError::Inline(err) => {
            assert_eq!(err.file, base.join("src/lib/a.component.ts"));
            assert!(err.to_string().contains("a.component.html"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!base.join(".ng_pkg_build").exists());
}

#[tokio::test]
async fn should_fail_on_missing_entry_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = PackageBuilder::new()
        .with_logger(Arc::new(NullLogger))
        .build_package(&PackageDescriptor::new("src/public_api.ts", "@my/lib"), dir.path())
        .await
        .unwrap_err();
    assert_eq!(err.stage(), BuildStage::SourcesDiscovered);
}

#[tokio::test]
async fn should_serve_rewritten_sources_to_compiler() {
    let compiler = Arc::new(RecordingCompiler::default());

    let out = PackageBuilder::new()
        .with_logger(Arc::new(NullLogger))
        .with_host(in_memory_host())
        .with_template_resolver(in_memory_templates())
        .with_compiler(compiler.clone())
        .build_package(&PackageDescriptor::new("src/public_api.ts", "@my/lib"), Path::new("/lib"))
        .await
        .unwrap();
    assert_eq!(out, PathBuf::from("/lib/.ng_pkg_build/lib.js"));

    let seen = compiler.seen.lock().unwrap();
    assert_eq!(
        seen.iter().map(|(path, _)| path.as_path()).collect::<Vec<_>>(),
        vec![Path::new("/lib/src/public_api.ts"), Path::new("/lib/src/a.ts")]
    );
    assert_eq!(
        seen[1].1,
        "import { Component as Cmp } from '@angular/core';\n\
         @Cmp({ template: '<p>hi</p>' }) export class A {}\n"
    );
}

#[tokio::test]
async fn should_fail_on_compiler_errors() {
    let logger = Arc::new(CapturingLogger::new());
    let compiler = Arc::new(RecordingCompiler {
        diagnostics: vec![
            Diagnostic::warning("deprecated API"),
            Diagnostic::error("type mismatch").with_file("/lib/src/a.ts"),
        ],
        ..RecordingCompiler::default()
    });

    let err = PackageBuilder::new()
        .with_logger(logger.clone())
        .with_host(in_memory_host())
        .with_template_resolver(in_memory_templates())
        .with_compiler(compiler)
        .build_package(&PackageDescriptor::new("src/public_api.ts", "@my/lib"), Path::new("/lib"))
        .await
        .unwrap_err();

    match err {
        BuildError::Compilation(err) => {
            assert_eq!(err.diagnostics.len(), 1);
            assert_eq!(err.diagnostics[0].message, "type mismatch");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(logger.messages(LogLevel::Warn), vec!["warning: deprecated API"]);
    assert_eq!(
        logger.messages(LogLevel::Error),
        vec!["error: type mismatch (/lib/src/a.ts)"]
    );
}
