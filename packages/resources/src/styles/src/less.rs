// Less Renderer
//
// Renders `.less` files with `lessc`. The engine receives the raw text on stdin and does
// not read the stylesheet itself; the stylesheet directory is passed as include path so
// relative `@import`s still resolve.

use async_trait::async_trait;

use super::engine::EngineCommand;
use super::format::RenderRequest;
use super::renderer::StyleRenderer;

#[derive(Debug, Clone)]
pub struct LessRenderer {
    engine: EngineCommand,
}

impl LessRenderer {
    pub fn new(engine: EngineCommand) -> Self {
        Self { engine }
    }

    fn args(request: &RenderRequest) -> Vec<String> {
        vec![
            "--no-color".to_string(),
            format!("--include-path={}", request.dir().display()),
            "-".to_string(),
        ]
    }
}

impl Default for LessRenderer {
    fn default() -> Self {
        Self::new(EngineCommand::new("lessc"))
    }
}

#[async_trait]
impl StyleRenderer for LessRenderer {
    fn name(&self) -> &'static str {
        "less"
    }

    async fn render(&self, request: &RenderRequest, raw: &str) -> anyhow::Result<String> {
        self.engine
            .run(&request.project_root, &Self::args(request), Some(raw))
            .await
    }
}
