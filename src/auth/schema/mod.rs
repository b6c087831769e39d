//! Permission schema
//!
//! The static catalog of `module.resource.action` triples a tenant may grant,
//! and the value type each action accepts. It is loaded once at startup,
//! validated, and then shared read-only (usually behind an `Arc`) by every
//! component that needs it.
//!
//! Its serialized form is exactly the discovery grammar:
//! `{module: {label, resources: {resource: {label, actions: {action: {type, options?}}}}}}`.

mod defaults;
mod loader;
mod types;

pub use defaults::SCOPE_LEVELS;
pub use types::{ActionDescriptor, ModuleDescriptor, PermissionSchema, ResourceDescriptor};
