//! Logging utilities
//!
//! Log level parsing and `tracing` subscriber initialisation.

mod init;
pub mod types;

pub use init::init_logging;
pub use types::LogLevel;
