// Renderer Dispatcher
//
// Picks the preprocessing engine for a stylesheet from its extension.

use std::path::Path;

use crate::error::{RenderStage, StylesheetRenderError};

use super::format::{RenderRequest, StyleFormat};
use super::less::LessRenderer;
use super::renderer::{CssRenderer, StyleRenderer};
use super::sass::SassRenderer;
use super::stylus::StylusRenderer;

/// One renderer per supported format.
pub struct RendererDispatcher {
    css: Box<dyn StyleRenderer>,
    sass: Box<dyn StyleRenderer>,
    less: Box<dyn StyleRenderer>,
    stylus: Box<dyn StyleRenderer>,
}

impl RendererDispatcher {
    pub fn new() -> Self {
        Self::with_renderers(
            Box::new(CssRenderer),
            Box::new(SassRenderer::default()),
            Box::new(LessRenderer::default()),
            Box::new(StylusRenderer::default()),
        )
    }

    pub fn with_renderers(
        css: Box<dyn StyleRenderer>,
        sass: Box<dyn StyleRenderer>,
        less: Box<dyn StyleRenderer>,
        stylus: Box<dyn StyleRenderer>,
    ) -> Self {
        Self {
            css,
            sass,
            less,
            stylus,
        }
    }

    pub fn select(&self, format: StyleFormat) -> &dyn StyleRenderer {
        match format {
            StyleFormat::Css => self.css.as_ref(),
            StyleFormat::Sass => self.sass.as_ref(),
            StyleFormat::Less => self.less.as_ref(),
            StyleFormat::Stylus => self.stylus.as_ref(),
        }
    }

    /// Render `raw` (the content of `path`) to plain CSS.
    ///
    /// Unrecognized extensions are treated as CSS and returned unchanged.
    pub async fn render(
        &self,
        path: &Path,
        raw: &str,
        project_root: &Path,
    ) -> Result<String, StylesheetRenderError> {
        let request = RenderRequest::new(path, project_root);
        let renderer = self.select(request.format);
        tracing::debug!("render {} with {}", path.display(), renderer.name());

        renderer
            .render(&request, raw)
            .await
            .map_err(|err| StylesheetRenderError::new(path, RenderStage::Render, err))
    }
}

impl Default for RendererDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
