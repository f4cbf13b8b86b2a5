#![deny(clippy::all)]

//! Component resource pipeline.
//!
//! Resolves the external files referenced from component metadata: templates are read
//! as opaque text, stylesheets are rendered by the engine matching their extension and
//! post-processed for the configured browser targets.

pub mod error;
pub mod logging;
pub mod resource;
pub mod styles;

pub use error::{RenderStage, ResourceNotFoundError, StylesheetError, StylesheetRenderError};
pub use logging::{CapturingLogger, LogLevel, Logger, NullLogger, TracingLogger};
pub use resource::{FsTemplateResolver, InMemoryTemplateResolver, TemplateResolver};
pub use styles::{
    PostProcessor, RenderRequest, RenderedStylesheet, RendererDispatcher, StyleFormat,
    StyleRenderer, StylesheetPipeline, StylesheetRenderer,
};
