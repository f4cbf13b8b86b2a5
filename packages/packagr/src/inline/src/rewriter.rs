// Annotation Rewriter
//
// Replaces `templateUrl`/`styleUrls` in component decorators with inlined content.
//
// Rewriting happens in three steps. The unit is parsed and every property to replace is
// recorded as an owned edit (span plus URLs); the AST is dropped before any resource is
// loaded. The resources are then resolved in declaration order. Finally the replacement
// text is spliced into the original source and the result is parsed again, so every
// byte outside the replaced properties is kept as written.

use std::sync::Arc;

use oxc_allocator::Allocator;
use oxc_ast::ast::{Class, Decorator, Expression, ObjectProperty, ObjectPropertyKind};
use oxc_ast_visit::{walk, Visit};
use smallvec::{smallvec, SmallVec};

use ng_packagr_resources::resource::resolve_resource_path;
use ng_packagr_resources::{StylesheetRenderer, TemplateResolver};

use crate::error::{InlineCause, MetadataInlineError, MetadataKey};
use crate::program::{CompilationUnit, RewrittenSources, SyntaxError};

use super::literal::quote_single;
use super::symbols::{CalleeRef, ComponentMarker, ImportBindings, LexicalResolver, SymbolResolver};

/// How decorator callees are matched against the component marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolResolution {
    /// Through the unit's import declarations.
    #[default]
    Imports,
    /// By identifier text.
    Lexical,
}

/// Outcome of rewriting one unit.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub unit: CompilationUnit,
    /// Number of properties replaced; zero means `unit` is the input unchanged.
    pub inlined: usize,
}

/// A property to replace, detached from the AST.
#[derive(Debug)]
struct PendingEdit {
    start: usize,
    end: usize,
    key: MetadataKey,
    urls: SmallVec<[String; 4]>,
}

pub struct AnnotationRewriter {
    templates: Arc<dyn TemplateResolver>,
    stylesheets: Arc<dyn StylesheetRenderer>,
    marker: ComponentMarker,
    resolution: SymbolResolution,
}

impl AnnotationRewriter {
    pub fn new(
        templates: Arc<dyn TemplateResolver>,
        stylesheets: Arc<dyn StylesheetRenderer>,
    ) -> Self {
        Self {
            templates,
            stylesheets,
            marker: ComponentMarker::default(),
            resolution: SymbolResolution::default(),
        }
    }

    pub fn with_marker(mut self, marker: ComponentMarker) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_resolution(mut self, resolution: SymbolResolution) -> Self {
        self.resolution = resolution;
        self
    }

    /// Rewrite every unit in order, stopping at the first failure.
    pub async fn rewrite_program(
        &self,
        units: &[CompilationUnit],
    ) -> Result<RewrittenSources, MetadataInlineError> {
        let mut rewritten = Vec::with_capacity(units.len());
        for unit in units {
            let rewrite = self.rewrite_unit(unit).await?;
            if rewrite.inlined > 0 {
                tracing::debug!(
                    "inlined {} resource reference(s) in {}",
                    rewrite.inlined,
                    unit.path().display()
                );
            }
            rewritten.push(rewrite.unit);
        }
        Ok(RewrittenSources::from_units(rewritten))
    }

    /// Rewrite the component annotations of one unit.
    ///
    /// A unit without component annotations, or a declaration file, comes back
    /// unchanged. On failure nothing of the unit is inlined.
    pub async fn rewrite_unit(&self, unit: &CompilationUnit) -> Result<Rewrite, MetadataInlineError> {
        if unit.is_declaration() {
            return Ok(Rewrite {
                unit: unit.clone(),
                inlined: 0,
            });
        }

        let edits = self.collect_edits(unit)?;
        if edits.is_empty() {
            return Ok(Rewrite {
                unit: unit.clone(),
                inlined: 0,
            });
        }

        let mut replacements = Vec::with_capacity(edits.len());
        for edit in &edits {
            let text = self
                .render_edit(unit, edit)
                .await
                .map_err(|cause| inline_error(unit, edit.key, edit.start, cause))?;
            replacements.push(text);
        }

        let mut text = unit.text().to_string();
        // Back to front, so earlier offsets stay valid.
        for (edit, replacement) in edits.iter().zip(replacements.iter()).rev() {
            text.replace_range(edit.start..edit.end, replacement);
        }

        let rewritten = unit
            .with_text(text)
            .map_err(|err| syntax_error(unit, err))?;
        Ok(Rewrite {
            unit: rewritten,
            inlined: edits.len(),
        })
    }

    fn collect_edits(&self, unit: &CompilationUnit) -> Result<Vec<PendingEdit>, MetadataInlineError> {
        let allocator = Allocator::default();
        let ret = unit.parse(&allocator);
        if let Some(error) = ret.errors.first() {
            return Err(syntax_error(
                unit,
                SyntaxError {
                    path: unit.path().to_path_buf(),
                    message: error.to_string(),
                    offset: None,
                },
            ));
        }

        let resolver: Box<dyn SymbolResolver> = match self.resolution {
            SymbolResolution::Imports => Box::new(ImportBindings::collect(&ret.program, &self.marker)),
            SymbolResolution::Lexical => Box::new(LexicalResolver::new(self.marker.clone())),
        };

        let mut collector = EditCollector {
            resolver: resolver.as_ref(),
            unit,
            edits: Vec::new(),
            error: None,
        };
        collector.visit_program(&ret.program);

        if let Some(error) = collector.error {
            return Err(error);
        }
        let mut edits = collector.edits;
        edits.sort_by_key(|edit| edit.start);
        Ok(edits)
    }

    async fn render_edit(&self, unit: &CompilationUnit, edit: &PendingEdit) -> Result<String, InlineCause> {
        match edit.key {
            MetadataKey::TemplateUrl => {
                let url = edit.urls.first().map(String::as_str).unwrap_or_default();
                let template = self.templates.resolve_template(unit.path(), url).await?;
                Ok(format!("template: {}", quote_single(&template)))
            }
            MetadataKey::StyleUrls => {
                let mut styles = Vec::with_capacity(edit.urls.len());
                for url in &edit.urls {
                    let path = resolve_resource_path(unit.path(), url);
                    let css = self.stylesheets.render_stylesheet(&path).await?;
                    styles.push(quote_single(&css));
                }
                Ok(format!("styles: [{}]", styles.join(", ")))
            }
            MetadataKey::Source => Err(InlineCause::InvalidMetadata(
                "no resource to inline".to_string(),
            )),
        }
    }
}

struct EditCollector<'r> {
    resolver: &'r dyn SymbolResolver,
    unit: &'r CompilationUnit,
    edits: Vec<PendingEdit>,
    error: Option<MetadataInlineError>,
}

impl<'a> Visit<'a> for EditCollector<'_> {
    fn visit_class(&mut self, class: &Class<'a>) {
        if self.error.is_some() {
            return;
        }
        for decorator in &class.decorators {
            self.inspect_decorator(decorator);
        }
        walk::walk_class(self, class);
    }
}

impl EditCollector<'_> {
    fn inspect_decorator(&mut self, decorator: &Decorator<'_>) {
        let Expression::CallExpression(call) = &decorator.expression else {
            return;
        };
        let callee = match &call.callee {
            Expression::Identifier(ident) => CalleeRef::Identifier(ident.name.as_str()),
            Expression::StaticMemberExpression(member) => match &member.object {
                Expression::Identifier(object) => CalleeRef::Member {
                    object: object.name.as_str(),
                    property: member.property.name.as_str(),
                },
                _ => return,
            },
            _ => return,
        };
        if !self.resolver.is_component_marker(&callee) {
            return;
        }

        let Some(Expression::ObjectExpression(metadata)) =
            call.arguments.first().and_then(|arg| arg.as_expression())
        else {
            return;
        };

        for property in &metadata.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = property else {
                continue;
            };
            let key = match prop.key.static_name().as_deref() {
                Some("templateUrl") => MetadataKey::TemplateUrl,
                Some("styleUrls") => MetadataKey::StyleUrls,
                _ => continue,
            };
            match property_urls(prop, key) {
                Ok(urls) => self.edits.push(PendingEdit {
                    start: prop.span.start as usize,
                    end: prop.span.end as usize,
                    key,
                    urls,
                }),
                Err(reason) => {
                    self.error = Some(inline_error(
                        self.unit,
                        key,
                        prop.span.start as usize,
                        InlineCause::InvalidMetadata(reason),
                    ));
                    return;
                }
            }
        }
    }
}

/// The literal URLs of a `templateUrl` or `styleUrls` property.
fn property_urls(prop: &ObjectProperty<'_>, key: MetadataKey) -> Result<SmallVec<[String; 4]>, String> {
    if prop.method || prop.shorthand {
        return Err(format!("{} must be a property assignment", key));
    }
    match key {
        MetadataKey::TemplateUrl => literal_text(&prop.value)
            .map(|url| smallvec![url])
            .ok_or_else(|| "templateUrl must be a string literal".to_string()),
        MetadataKey::StyleUrls => {
            let Expression::ArrayExpression(array) = &prop.value else {
                return Err("styleUrls must be an array literal".to_string());
            };
            array
                .elements
                .iter()
                .map(|element| {
                    element
                        .as_expression()
                        .and_then(literal_text)
                        .ok_or_else(|| "styleUrls entries must be string literals".to_string())
                })
                .collect()
        }
        MetadataKey::Source => Err("unexpected metadata key".to_string()),
    }
}

/// Text of a string literal or of a template literal without substitutions.
fn literal_text(expr: &Expression<'_>) -> Option<String> {
    match expr {
        Expression::StringLiteral(lit) => Some(lit.value.to_string()),
        Expression::TemplateLiteral(lit) if lit.is_no_substitution_template() => lit
            .quasis
            .first()
            .and_then(|quasi| quasi.value.cooked.as_ref())
            .map(|cooked| cooked.to_string()),
        _ => None,
    }
}

fn inline_error(
    unit: &CompilationUnit,
    property: MetadataKey,
    offset: usize,
    cause: InlineCause,
) -> MetadataInlineError {
    let (line, column) = unit.line_column(offset);
    MetadataInlineError {
        file: unit.path().to_path_buf(),
        property,
        line,
        column,
        cause,
    }
}

fn syntax_error(unit: &CompilationUnit, err: SyntaxError) -> MetadataInlineError {
    inline_error(
        unit,
        MetadataKey::Source,
        err.offset.unwrap_or(0),
        InlineCause::Parse(err.message),
    )
}
