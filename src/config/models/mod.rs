//! Configuration data models

pub mod logging;
pub mod rbac;

pub use logging::*;
pub use rbac::*;
