//! Utility modules shared by the engine, configuration and CLI
//!
//! - **error**: crate error type and constructors
//! - **logging**: log level parsing and subscriber setup

pub mod error;
pub mod logging;
