pub mod descriptor;
pub mod tsconfig;

use thiserror::Error;

pub use descriptor::PackageDescriptor;
pub use tsconfig::{prepare_configuration, strip_json_comments, CompilerConfiguration};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid package descriptor: {0}")]
    InvalidDescriptor(String),
}
