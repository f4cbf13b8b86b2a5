//! Logging collaborator.
//!
//! Non-fatal messages produced while inlining (post-processor warnings, engine
//! notices) are forwarded through the `Logger` trait so the embedding build tool
//! decides where they end up.

pub mod src;


pub use src::capturing_logger::CapturingLogger;
pub use src::logger::{LogLevel, Logger, NullLogger};
pub use src::tracing_logger::TracingLogger;
