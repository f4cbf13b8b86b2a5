//! Component metadata inlining.
//!
//! Rewrites `@Component({ templateUrl, styleUrls })` into `@Component({ template, styles })`
//! with the resolved template text and the rendered stylesheets as string literals.

pub mod src;

#[cfg(test)]
mod test;

pub use src::literal::quote_single;
pub use src::rewriter::{AnnotationRewriter, Rewrite, SymbolResolution};
pub use src::symbols::{CalleeRef, ComponentMarker, ImportBindings, LexicalResolver, SymbolResolver};
