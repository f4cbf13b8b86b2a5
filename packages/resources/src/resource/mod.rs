pub mod src;


pub use src::loader::{FsTemplateResolver, InMemoryTemplateResolver, TemplateResolver};
pub use src::path::{normalize_path, resolve_resource_path};
