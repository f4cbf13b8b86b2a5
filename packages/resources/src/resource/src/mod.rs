pub mod loader;
pub mod path;
