pub mod capturing_logger;
pub mod logger;
pub mod tracing_logger;
