// Template Resolver
//
// Loads component templates referenced by `templateUrl`.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::path::{normalize_path, resolve_resource_path};
use crate::error::ResourceNotFoundError;

/// Resolves a template URL declared in a source file and returns its text.
#[async_trait]
pub trait TemplateResolver: Send + Sync {
    async fn resolve_template(
        &self,
        declaring_file: &Path,
        template_url: &str,
    ) -> Result<String, ResourceNotFoundError>;
}

/// Reads templates from disk, relative to the declaring source file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsTemplateResolver;

impl FsTemplateResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TemplateResolver for FsTemplateResolver {
    async fn resolve_template(
        &self,
        declaring_file: &Path,
        template_url: &str,
    ) -> Result<String, ResourceNotFoundError> {
        let path = resolve_resource_path(declaring_file, template_url);
        tracing::debug!("read template {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ResourceNotFoundError::new(path, e))
    }
}

/// In-memory template resolver, keyed by resolved path.
#[derive(Default)]
pub struct InMemoryTemplateResolver {
    resources: HashMap<PathBuf, String>,
}

impl InMemoryTemplateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl AsRef<Path>, content: &str) {
        self.resources
            .insert(normalize_path(path.as_ref()), content.to_string());
    }
}

#[async_trait]
impl TemplateResolver for InMemoryTemplateResolver {
    async fn resolve_template(
        &self,
        declaring_file: &Path,
        template_url: &str,
    ) -> Result<String, ResourceNotFoundError> {
        let path = resolve_resource_path(declaring_file, template_url);
        match self.resources.get(&path) {
            Some(content) => Ok(content.clone()),
            None => Err(ResourceNotFoundError::new(
                path,
                io::Error::from(io::ErrorKind::NotFound),
            )),
        }
    }
}
