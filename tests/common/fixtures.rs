//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use serde_json::Value;
use tenant_rbac::config::RbacConfig;
use tenant_rbac::core::models::{Tenant, User};
use tenant_rbac::{PermissionsDocument, RbacSystem, Role};
use uuid::Uuid;

/// Factory for creating test users
pub struct UserFactory;

impl UserFactory {
    /// Create a user attached to `tenant_id`
    pub fn member(tenant_id: Uuid) -> User {
        User::new(
            format!("user-{}@example.com", &Uuid::new_v4().to_string()[..8]),
            Some(tenant_id),
        )
    }

    /// Create a user with no tenant yet
    pub fn unattached() -> User {
        User::new(
            format!("new-{}@example.com", &Uuid::new_v4().to_string()[..8]),
            None,
        )
    }

    /// Create a platform super admin
    pub fn super_admin() -> User {
        User::super_admin("root@example.com")
    }
}

/// Factory for creating test roles
pub struct RoleFactory;

impl RoleFactory {
    /// Create a role from a JSON permissions document
    pub fn from_json(tenant_id: Uuid, name: &str, permissions: Value) -> Role {
        let document = PermissionsDocument::from_json(permissions)
            .unwrap_or_else(|e| panic!("invalid permissions fixture: {}", e));
        Role::new(tenant_id, name, document)
    }

    /// Sales rep: sees and edits own leads
    pub fn sales_rep(tenant_id: Uuid) -> Role {
        Self::from_json(
            tenant_id,
            "Sales Rep",
            serde_json::json!({
                "crm": {
                    "leads": {"view": "own", "create": true, "edit": "own"},
                    "activities": {"view": "own", "create": true}
                }
            }),
        )
    }

    /// Sales manager: sees the whole team, may delete
    pub fn sales_manager(tenant_id: Uuid) -> Role {
        Self::from_json(
            tenant_id,
            "Sales Manager",
            serde_json::json!({
                "crm": {
                    "leads": {"view": "team", "edit": "team", "delete": true, "export": "team"}
                }
            }),
        )
    }
}

/// A bootstrapped tenant with its admin
pub struct TenantFixture {
    pub rbac: RbacSystem,
    pub tenant: Tenant,
    pub admin: User,
    pub admin_role: Role,
}

impl TenantFixture {
    /// Bootstrap a tenant on the built-in schema
    pub fn new() -> Self {
        let rbac = RbacSystem::with_schema(
            &RbacConfig::default(),
            std::sync::Arc::new(tenant_rbac::PermissionSchema::builtin()),
        )
        .unwrap_or_else(|e| panic!("built-in schema rejected: {}", e));

        let mut admin = UserFactory::unattached();
        let (tenant, admin_role) = rbac.bootstrap_tenant("Acme", "acme", vec![], &mut admin);

        Self {
            rbac,
            tenant,
            admin,
            admin_role,
        }
    }
}
