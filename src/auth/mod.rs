//! Authorization: permission schema, role-based permission engine and claims projection

pub mod claims;
pub mod rbac;
pub mod schema;

pub use claims::PermissionClaims;
pub use rbac::{
    AccessContext, AccessPolicy, EffectivePermissionSet, PermissionCheck, PermissionValue,
    PermissionsDocument, Principal, RbacSystem, Role,
};
pub use schema::PermissionSchema;
