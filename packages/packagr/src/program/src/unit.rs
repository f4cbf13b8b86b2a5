// Compilation Unit
//
// One TypeScript source file: path, text and source type. Units are immutable; the
// AST is rebuilt on demand inside a caller-provided arena.

use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::Statement;
use oxc_parser::{Parser, ParserReturn};
use oxc_span::SourceType;
use thiserror::Error;

/// A unit whose text does not parse.
#[derive(Debug, Clone, Error)]
#[error("{}: {message}", .path.display())]
pub struct SyntaxError {
    pub path: PathBuf,
    pub message: String,
    /// Byte offset of the first error, when the parser reports one.
    pub offset: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    path: PathBuf,
    text: String,
    source_type: SourceType,
}

impl CompilationUnit {
    /// Build a unit, checking that `text` parses.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, SyntaxError> {
        let path = path.into();
        let source_type = SourceType::from_path(&path).unwrap_or_else(|_| SourceType::ts());
        let unit = Self {
            path,
            text: text.into(),
            source_type,
        };
        unit.validate()?;
        Ok(unit)
    }

    /// A unit at the same path holding `text`.
    pub fn with_text(&self, text: impl Into<String>) -> Result<Self, SyntaxError> {
        let unit = Self {
            path: self.path.clone(),
            text: text.into(),
            source_type: self.source_type,
        };
        unit.validate()?;
        Ok(unit)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    /// `.d.ts` files carry no decorators to rewrite and no code to emit.
    pub fn is_declaration(&self) -> bool {
        self.source_type.is_typescript_definition()
    }

    pub fn parse<'a>(&'a self, allocator: &'a Allocator) -> ParserReturn<'a> {
        Parser::new(allocator, &self.text, self.source_type).parse()
    }

    /// Specifiers of every `import`, `export ... from` and `export * from` in the unit.
    pub fn module_specifiers(&self) -> Vec<String> {
        let allocator = Allocator::default();
        let ret = self.parse(&allocator);

        ret.program
            .body
            .iter()
            .filter_map(|statement| match statement {
                Statement::ImportDeclaration(decl) => Some(decl.source.value.as_str()),
                Statement::ExportNamedDeclaration(decl) => {
                    decl.source.as_ref().map(|s| s.value.as_str())
                }
                Statement::ExportAllDeclaration(decl) => Some(decl.source.value.as_str()),
                _ => None,
            })
            .map(String::from)
            .collect()
    }

    /// 1-based line and column (in characters) of a byte offset.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let before = self.text.get(..offset).unwrap_or(&self.text);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }

    fn validate(&self) -> Result<(), SyntaxError> {
        let allocator = Allocator::default();
        let ret = self.parse(&allocator);

        if let Some(error) = ret.errors.first() {
            let offset = error
                .labels
                .as_ref()
                .and_then(|labels| labels.first())
                .map(|label| label.offset());
            return Err(SyntaxError {
                path: self.path.clone(),
                message: error.to_string(),
                offset,
            });
        }
        if ret.panicked {
            return Err(SyntaxError {
                path: self.path.clone(),
                message: "parser aborted".to_string(),
                offset: None,
            });
        }
        Ok(())
    }
}
