// Style Renderer
//
// Uniform contract over the preprocessing engines.

use async_trait::async_trait;

use super::format::RenderRequest;

/// Turns one stylesheet into plain CSS text.
///
/// `raw` is the file content as read by the caller. Engines that resolve imports on
/// their own (sass, stylus) read from `request.path` instead.
#[async_trait]
pub trait StyleRenderer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn render(&self, request: &RenderRequest, raw: &str) -> anyhow::Result<String>;
}

/// Plain CSS passthrough.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssRenderer;

#[async_trait]
impl StyleRenderer for CssRenderer {
    fn name(&self) -> &'static str {
        "css"
    }

    async fn render(&self, _request: &RenderRequest, raw: &str) -> anyhow::Result<String> {
        Ok(raw.to_string())
    }
}
