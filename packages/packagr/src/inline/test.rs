// Inline Tests
//
// Tests for rewriting component annotations.

#[cfg(test)]
mod tests {
    use crate::error::{InlineCause, MetadataKey};
    use crate::inline::*;
    use crate::program::CompilationUnit;
    use async_trait::async_trait;
    use ng_packagr_resources::{
        InMemoryTemplateResolver, ResourceNotFoundError, StylesheetError, StylesheetRenderer,
    };
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::Duration;

    /// Stylesheets served from memory, each after its own delay.
    #[derive(Default)]
    struct SlowStylesheets {
        sheets: HashMap<PathBuf, (u64, String)>,
    }

    impl SlowStylesheets {
        fn add(mut self, path: &str, delay_ms: u64, css: &str) -> Self {
            self.sheets
                .insert(PathBuf::from(path), (delay_ms, css.to_string()));
            self
        }
    }

    #[async_trait]
    impl StylesheetRenderer for SlowStylesheets {
        async fn render_stylesheet(&self, path: &Path) -> Result<String, StylesheetError> {
            match self.sheets.get(path) {
                Some((delay, css)) => {
                    tokio::time::sleep(Duration::from_millis(*delay)).await;
                    Ok(css.clone())
                }
                None => Err(ResourceNotFoundError::new(
                    path,
                    io::Error::from(io::ErrorKind::NotFound),
                )
                .into()),
            }
        }
    }

    fn rewriter(templates: InMemoryTemplateResolver, styles: SlowStylesheets) -> AnnotationRewriter {
        AnnotationRewriter::new(Arc::new(templates), Arc::new(styles))
    }

    fn templates() -> InMemoryTemplateResolver {
        let mut templates = InMemoryTemplateResolver::new();
        templates.add("/lib/src/a.html", "<p>hi</p>");
        templates
    }

    fn unit(text: &str) -> CompilationUnit {
        CompilationUnit::new("/lib/src/a.component.ts", text).unwrap()
    }

    mod template_tests {
        use super::*;

        #[tokio::test]
        async fn should_leave_units_without_components_untouched() {
            let source = "// header\nimport { Injectable } from '@angular/core';\n\n@Injectable()\nexport class S {   }\n";
            let input = unit(source);

            let rewrite = rewriter(templates(), SlowStylesheets::default())
                .rewrite_unit(&input)
                .await
                .unwrap();
            assert_eq!(rewrite.inlined, 0);
            assert_eq!(rewrite.unit, input);
        }

        #[tokio::test]
        async fn should_inline_template() {
            let source = "import { Component } from '@angular/core';\n\
                          @Component({ templateUrl: './a.html' })\n\
                          export class A {}\n";

            let rewrite = rewriter(templates(), SlowStylesheets::default())
                .rewrite_unit(&unit(source))
                .await
                .unwrap();
            assert_eq!(rewrite.inlined, 1);
            assert_eq!(
                rewrite.unit.text(),
                "import { Component } from '@angular/core';\n\
                 @Component({ template: '<p>hi</p>' })\n\
                 export class A {}\n"
            );
        }

        #[tokio::test]
        async fn should_preserve_surrounding_text() {
            let source = "import { Component } from '@angular/core';\n\
                          /** Docs. */\n\
                          @Component({\n    selector: 'lib-a', // inline comment\n    templateUrl: \"a.html\",\n    host: { class: 'a' },\n})\n\
                          export class A {\n    value   =   1;\n}\n";

            let rewrite = rewriter(templates(), SlowStylesheets::default())
                .rewrite_unit(&unit(source))
                .await
                .unwrap();
            assert_eq!(
                rewrite.unit.text(),
                source.replace("templateUrl: \"a.html\"", "template: '<p>hi</p>'")
            );
        }

        #[tokio::test]
        async fn should_escape_template_content() {
            let mut templates = InMemoryTemplateResolver::new();
            templates.add("/lib/src/a.html", "<p title='x'>\n  a\\b\n</p>");
            let source = "import { Component } from '@angular/core';\n\
                          @Component({ templateUrl: 'a.html' }) export class A {}\n";

            let rewrite = rewriter(templates, SlowStylesheets::default())
                .rewrite_unit(&unit(source))
                .await
                .unwrap();
            assert!(rewrite
                .unit
                .text()
                .contains(r"template: '<p title=\'x\'>\n  a\\b\n</p>'"));
        }

        #[tokio::test]
        async fn should_resolve_aliased_marker() {
            let source = "import { Component as Cmp } from '@angular/core';\n\
                          @Cmp({ templateUrl: './a.html' }) export class A {}\n";

            let rewrite = rewriter(templates(), SlowStylesheets::default())
                .rewrite_unit(&unit(source))
                .await
                .unwrap();
            assert!(rewrite.unit.text().contains("@Cmp({ template: '<p>hi</p>' })"));
        }

        #[tokio::test]
        async fn should_resolve_namespace_marker() {
            let source = "import * as ng from '@angular/core';\n\
                          @ng.Component({ templateUrl: './a.html' }) export class A {}\n";

            let rewrite = rewriter(templates(), SlowStylesheets::default())
                .rewrite_unit(&unit(source))
                .await
                .unwrap();
            assert!(rewrite
                .unit
                .text()
                .contains("@ng.Component({ template: '<p>hi</p>' })"));
        }

        #[tokio::test]
        async fn should_match_text_only_with_lexical_resolution() {
            let source = "import { Component as Cmp } from '@angular/core';\n\
                          @Cmp({ templateUrl: './a.html' }) export class A {}\n";

            let rewrite = rewriter(templates(), SlowStylesheets::default())
                .with_resolution(SymbolResolution::Lexical)
                .rewrite_unit(&unit(source))
                .await
                .unwrap();
            assert_eq!(rewrite.inlined, 0);
        }

        #[tokio::test]
        async fn should_report_missing_template() {
            let source = "import { Component } from '@angular/core';\n\
                          @Component({ templateUrl: './missing.html' }) export class A {}\n";

            let err = rewriter(templates(), SlowStylesheets::default())
                .rewrite_unit(&unit(source))
                .await
                .unwrap_err();
            assert_eq!(err.file, PathBuf::from("/lib/src/a.component.ts"));
            assert_eq!(err.property, MetadataKey::TemplateUrl);
            assert_eq!((err.line, err.column), (2, 14));
            match err.cause {
                InlineCause::Template(cause) => {
                    assert_eq!(cause.path, PathBuf::from("/lib/src/missing.html"));
                    assert_eq!(cause.kind(), io::ErrorKind::NotFound);
                }
                other => panic!("unexpected cause: {other}"),
            }
        }

        #[tokio::test]
        async fn should_pass_declaration_files_through() {
            let input = CompilationUnit::new(
                "/lib/src/a.d.ts",
                "export declare class A {}\n",
            )
            .unwrap();
            let rewrite = rewriter(templates(), SlowStylesheets::default())
                .rewrite_unit(&input)
                .await
                .unwrap();
            assert_eq!(rewrite.unit, input);
        }
    }

    mod styles_tests {
        use super::*;

        #[tokio::test]
        async fn should_inline_styles_in_declaration_order() {
            let styles = SlowStylesheets::default()
                .add("/lib/src/a.scss", 30, ".a{}")
                .add("/lib/src/b.less", 0, ".b{}")
                .add("/lib/src/c.styl", 10, ".c{}");
            let source = "import { Component } from '@angular/core';\n\
                          @Component({ styleUrls: ['./a.scss', './b.less', './c.styl'] }) export class A {}\n";

            let rewrite = rewriter(templates(), styles)
                .rewrite_unit(&unit(source))
                .await
                .unwrap();
            assert!(rewrite
                .unit
                .text()
                .contains("@Component({ styles: ['.a{}', '.b{}', '.c{}'] })"));
            assert!(!rewrite.unit.text().contains("styleUrls"));
        }

        #[tokio::test]
        async fn should_inline_template_and_styles_together() {
            let styles = SlowStylesheets::default().add("/lib/src/a.css", 0, "p { color: red; }\n");
            let source = "import { Component } from '@angular/core';\n\
                          @Component({ templateUrl: './a.html', styleUrls: ['./a.css'] }) export class A {}\n";

            let rewrite = rewriter(templates(), styles)
                .rewrite_unit(&unit(source))
                .await
                .unwrap();
            assert_eq!(rewrite.inlined, 2);
            assert!(rewrite.unit.text().contains(
                "@Component({ template: '<p>hi</p>', styles: ['p { color: red; }\\n'] })"
            ));
        }

        #[tokio::test]
        async fn should_fail_whole_unit_on_missing_stylesheet() {
            let styles = SlowStylesheets::default().add("/lib/src/a.css", 0, ".a{}");
            let source = "import { Component } from '@angular/core';\n\
                          @Component({ templateUrl: './a.html', styleUrls: ['./a.css', './gone.css'] }) export class A {}\n";

            let err = rewriter(templates(), styles)
                .rewrite_unit(&unit(source))
                .await
                .unwrap_err();
            assert_eq!(err.property, MetadataKey::StyleUrls);
            match err.cause {
                InlineCause::Stylesheet(cause) => {
                    assert_eq!(cause.path(), Path::new("/lib/src/gone.css"))
                }
                other => panic!("unexpected cause: {other}"),
            }
        }
    }

    mod program_tests {
        use super::*;

        #[tokio::test]
        async fn should_stop_at_first_failing_unit() {
            let valid = CompilationUnit::new(
                "/lib/src/a.component.ts",
                "import { Component } from '@angular/core';\n\
                 @Component({ templateUrl: './a.html' }) export class A {}\n",
            )
            .unwrap();
            let invalid = CompilationUnit::new(
                "/lib/src/b.component.ts",
                "import { Component } from '@angular/core';\n\
                 @Component({ templateUrl: './b.html' }) export class B {}\n",
            )
            .unwrap();

            let rewriter = rewriter(templates(), SlowStylesheets::default());
            let ok = rewriter.rewrite_program(&[valid.clone()]).await.unwrap();
            assert!(ok
                .get(valid.path())
                .unwrap()
                .text()
                .contains("template: '<p>hi</p>'"));

            let err = rewriter.rewrite_program(&[valid, invalid]).await.unwrap_err();
            assert_eq!(err.file, PathBuf::from("/lib/src/b.component.ts"));
            assert!(err.to_string().contains("/lib/src/b.html"));
        }

        #[tokio::test]
        async fn should_keep_every_unit_in_order() {
            let units = vec![
                CompilationUnit::new("/lib/src/index.ts", "export * from './a.component';").unwrap(),
                CompilationUnit::new(
                    "/lib/src/a.component.ts",
                    "import { Component } from '@angular/core';\n\
                     @Component({ templateUrl: './a.html' }) export class A {}\n",
                )
                .unwrap(),
            ];

            let sources = rewriter(templates(), SlowStylesheets::default())
                .rewrite_program(&units)
                .await
                .unwrap();
            assert_eq!(
                sources.paths().collect::<Vec<_>>(),
                vec![
                    Path::new("/lib/src/index.ts"),
                    Path::new("/lib/src/a.component.ts")
                ]
            );
            assert_eq!(
                sources.get(Path::new("/lib/src/index.ts")).unwrap().text(),
                "export * from './a.component';"
            );
        }
    }
}
