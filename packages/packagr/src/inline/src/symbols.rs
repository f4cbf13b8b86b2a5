// Symbol Resolution
//
// Decides whether a decorator callee refers to the component marker.

use std::collections::HashSet;

use oxc_ast::ast::{ImportDeclarationSpecifier, Program, Statement};

/// The exported symbol that marks a class as a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMarker {
    pub name: String,
    pub module: String,
}

impl Default for ComponentMarker {
    fn default() -> Self {
        Self {
            name: "Component".to_string(),
            module: "@angular/core".to_string(),
        }
    }
}

/// A decorator callee, reduced to the names it is spelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalleeRef<'s> {
    /// `@Component(...)`, `@Cmp(...)`
    Identifier(&'s str),
    /// `@ng.Component(...)`
    Member { object: &'s str, property: &'s str },
}

pub trait SymbolResolver {
    fn is_component_marker(&self, callee: &CalleeRef<'_>) -> bool;
}

/// Resolution through the import declarations of the unit.
///
/// Follows aliased named imports and namespace imports of the marker module. A bare
/// marker name that no import binds (a global, or a declaration elsewhere in the unit)
/// still matches; one imported from another module does not.
#[derive(Debug, Clone, Default)]
pub struct ImportBindings {
    marker_name: String,
    /// Local names bound to the marker symbol.
    named: HashSet<String>,
    /// Local names of namespace imports of the marker module.
    namespaces: HashSet<String>,
    /// Every local name introduced by an import.
    imported: HashSet<String>,
}

impl ImportBindings {
    pub fn collect(program: &Program<'_>, marker: &ComponentMarker) -> Self {
        let mut bindings = Self {
            marker_name: marker.name.clone(),
            ..Self::default()
        };

        for statement in &program.body {
            let Statement::ImportDeclaration(decl) = statement else {
                continue;
            };
            let from_marker_module = decl.source.value.as_str() == marker.module;
            let Some(specifiers) = &decl.specifiers else {
                continue;
            };

            for specifier in specifiers {
                match specifier {
                    ImportDeclarationSpecifier::ImportSpecifier(s) => {
                        let local = s.local.name.to_string();
                        if from_marker_module && s.imported.name().as_str() == marker.name {
                            bindings.named.insert(local.clone());
                        }
                        bindings.imported.insert(local);
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                        let local = s.local.name.to_string();
                        if from_marker_module {
                            bindings.namespaces.insert(local.clone());
                        }
                        bindings.imported.insert(local);
                    }
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                        bindings.imported.insert(s.local.name.to_string());
                    }
                }
            }
        }

        bindings
    }
}

impl SymbolResolver for ImportBindings {
    fn is_component_marker(&self, callee: &CalleeRef<'_>) -> bool {
        match *callee {
            CalleeRef::Identifier(name) => {
                self.named.contains(name)
                    || (name == self.marker_name && !self.imported.contains(name))
            }
            CalleeRef::Member { object, property } => {
                self.namespaces.contains(object) && property == self.marker_name
            }
        }
    }
}

/// Matches the callee's identifier text against the marker name.
#[derive(Debug, Clone, Default)]
pub struct LexicalResolver {
    marker: ComponentMarker,
}

impl LexicalResolver {
    pub fn new(marker: ComponentMarker) -> Self {
        Self { marker }
    }
}

impl SymbolResolver for LexicalResolver {
    fn is_component_marker(&self, callee: &CalleeRef<'_>) -> bool {
        matches!(*callee, CalleeRef::Identifier(name) if name == self.marker.name)
    }
}
