//! # tenant-rbac
//!
//! Role-based permission engine for multi-tenant SaaS backends.
//!
//! ## Features
//!
//! - **Permission Schema**: versioned catalog of `module.resource.action` paths
//!   and the value each accepts (boolean or ranked scope)
//! - **Roles**: tenant-scoped nested permission documents, sparse and tolerant
//!   of ad-hoc keys such as `admin.full_access`
//! - **Deterministic merging**: boolean OR, highest scope wins, last type wins
//! - **Scoped evaluation**: `own` / `team` / `all` decisions with a super-admin bypass
//! - **Claims projection**: a portable bundle for token issuance
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tenant_rbac::{AccessContext, RbacSystem, Role, PermissionsDocument, config::RbacConfig};
//! use tenant_rbac::core::models::User;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rbac = RbacSystem::new(&RbacConfig::default()).await?;
//!
//!     let mut user = User::new("rep@example.com", None);
//!     let (tenant, admin_role) = rbac.bootstrap_tenant("Acme", "acme", vec![], &mut user);
//!
//!     let sales = Role::new(
//!         tenant.id,
//!         "Sales Rep",
//!         PermissionsDocument::new().grant("crm.leads.edit", "own"),
//!     );
//!
//!     let principal = rbac.principal(&user, &[admin_role, sales]);
//!     let ctx = AccessContext::for_user(&user).owned_by(user.id);
//!     assert!(rbac.authorize(&principal, "crm.leads.edit", &ctx));
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use auth::rbac::{authorize, authorize_user, flatten, merge};
pub use auth::{
    AccessContext, AccessPolicy, EffectivePermissionSet, PermissionCheck, PermissionClaims,
    PermissionSchema, PermissionValue, PermissionsDocument, Principal, RbacSystem, Role,
};
pub use config::Config;
pub use utils::error::{RbacError, Result};
