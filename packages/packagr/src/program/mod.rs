//! Compilation units and source discovery.
//!
//! A program is the set of TypeScript units reachable from the package entry file
//! through relative imports and re-exports.

pub mod src;


pub use src::discovery::{discover_sources, DiscoveryError};
pub use src::sources::RewrittenSources;
pub use src::unit::{CompilationUnit, SyntaxError};
