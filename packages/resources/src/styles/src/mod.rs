pub mod dispatcher;
pub mod engine;
pub mod format;
pub mod less;
pub mod pipeline;
pub mod post_processor;
pub mod renderer;
pub mod sass;
pub mod stylus;
