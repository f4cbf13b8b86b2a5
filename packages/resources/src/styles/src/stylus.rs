// Stylus Renderer
//
// Renders `.styl`/`.stylus` files with the `stylus` CLI. Include paths cover the project
// root, the working directory and `node_modules` (for plugins), and url resolution is on
// so relative asset references are rewritten against the stylesheet.

use async_trait::async_trait;

use super::engine::EngineCommand;
use super::format::RenderRequest;
use super::renderer::StyleRenderer;

#[derive(Debug, Clone)]
pub struct StylusRenderer {
    engine: EngineCommand,
}

impl StylusRenderer {
    pub fn new(engine: EngineCommand) -> Self {
        Self { engine }
    }

    fn args(request: &RenderRequest) -> Vec<String> {
        vec![
            "--print".to_string(),
            "--resolve-url".to_string(),
            "--include".to_string(),
            request.project_root.display().to_string(),
            "--include".to_string(),
            ".".to_string(),
            "--include".to_string(),
            "node_modules".to_string(),
            request.path.display().to_string(),
        ]
    }
}

impl Default for StylusRenderer {
    fn default() -> Self {
        Self::new(EngineCommand::new("stylus"))
    }
}

#[async_trait]
impl StyleRenderer for StylusRenderer {
    fn name(&self) -> &'static str {
        "stylus"
    }

    async fn render(&self, request: &RenderRequest, _raw: &str) -> anyhow::Result<String> {
        self.engine
            .run(&request.project_root, &Self::args(request), None)
            .await
    }
}
