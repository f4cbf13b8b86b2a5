pub mod literal;
pub mod rewriter;
pub mod symbols;
