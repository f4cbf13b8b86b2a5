pub mod api;
pub mod compiler_host;
pub mod util;
