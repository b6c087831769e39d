//! Configuration validation
//!
//! - `trait_def`: core Validate trait definition
//! - `rbac_validators`: validators for the engine and logging sections

mod rbac_validators;
mod trait_def;

pub use rbac_validators::validate_permission_path;
pub use trait_def::Validate;
