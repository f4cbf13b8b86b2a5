// Stylesheet Pipeline
//
// Read, render and post-process one stylesheet.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{ResourceNotFoundError, StylesheetError};
use crate::logging::Logger;

use super::dispatcher::RendererDispatcher;
use super::post_processor::PostProcessor;

/// Produces the final CSS for a stylesheet path.
#[async_trait]
pub trait StylesheetRenderer: Send + Sync {
    async fn render_stylesheet(&self, path: &Path) -> Result<String, StylesheetError>;
}

pub struct StylesheetPipeline {
    dispatcher: RendererDispatcher,
    post_processor: PostProcessor,
    project_root: PathBuf,
}

impl StylesheetPipeline {
    pub fn new(project_root: impl Into<PathBuf>, logger: Arc<dyn Logger>) -> Self {
        Self::with_dispatcher(project_root, RendererDispatcher::new(), logger)
    }

    pub fn with_dispatcher(
        project_root: impl Into<PathBuf>,
        dispatcher: RendererDispatcher,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            dispatcher,
            post_processor: PostProcessor::new(logger),
            project_root: project_root.into(),
        }
    }
}

#[async_trait]
impl StylesheetRenderer for StylesheetPipeline {
    async fn render_stylesheet(&self, path: &Path) -> Result<String, StylesheetError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| ResourceNotFoundError::new(path, err))?;

        let css = self.dispatcher.render(path, &raw, &self.project_root).await?;
        let rendered = self.post_processor.process(&css, path)?;
        Ok(rendered.css)
    }
}
