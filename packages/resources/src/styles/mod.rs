//! Stylesheet rendering.
//!
//! Each stylesheet referenced from `styleUrls` goes through three steps that fail as one
//! operation: the raw file is read, rendered to CSS by the engine selected from its
//! extension, and run through the browser-target post-processor.

pub mod src;


pub use src::dispatcher::RendererDispatcher;
pub use src::engine::EngineCommand;
pub use src::format::{RenderRequest, StyleFormat};
pub use src::less::LessRenderer;
pub use src::pipeline::{StylesheetPipeline, StylesheetRenderer};
pub use src::post_processor::{resolve_browser_targets, PostProcessor, RenderedStylesheet};
pub use src::renderer::{CssRenderer, StyleRenderer};
pub use src::sass::{resolve_tilde_import, SassRenderer};
pub use src::stylus::StylusRenderer;
