//! Role-Based Access Control (RBAC) engine
//!
//! Turns per-tenant, per-role nested permission documents into one effective
//! permission set per user and evaluates access decisions against it.
//!
//! ```text
//! Role documents --flatten--> flat maps --merge--> EffectivePermissionSet --authorize--> bool
//! ```
//!
//! Every operation here is pure and synchronous. Callers fetch the user's
//! current roles before invoking the engine and recompute per request.

mod evaluate;
mod flatten;
mod guards;
mod merge;
mod roles;
mod system;
mod types;

pub use evaluate::{authorize, authorize_user};
pub use flatten::flatten;
pub use guards::{AccessPolicy, Principal};
pub use merge::merge;
pub use system::RbacSystem;
pub use types::{
    AccessContext, EffectivePermissionSet, FlatPermissionMap, PermissionCheck, PermissionNode,
    PermissionValue, PermissionsDocument, Role, scope,
};
