//! Request-level access guards

use serde::{Deserialize, Serialize};

use super::evaluate::authorize_user;
use super::types::{AccessContext, EffectivePermissionSet};
use crate::core::models::User;

/// An authenticated user together with their effective permissions
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub user: User,
    pub permissions: EffectivePermissionSet,
}

impl Principal {
    pub fn new(user: User, permissions: EffectivePermissionSet) -> Self {
        Self { user, permissions }
    }

    pub fn is_super_admin(&self) -> bool {
        self.user.is_super_admin
    }

    /// Evaluate `path` with the super-admin bypass
    pub fn can(&self, path: &str, ctx: &AccessContext) -> bool {
        authorize_user(&self.user, &self.permissions, path, ctx)
    }
}

/// Guard a dispatch layer attaches to an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "path", rename_all = "snake_case")]
pub enum AccessPolicy {
    /// Platform super admins only
    SuperAdmin,
    /// Super admins, or holders of the given escape-hatch path
    TenantAdmin(String),
    /// Super admins, or any user attached to a tenant
    TenantMember,
    /// A specific permission path
    Permission(String),
}

impl AccessPolicy {
    pub fn permission(path: impl Into<String>) -> Self {
        Self::Permission(path.into())
    }

    pub fn tenant_admin(admin_permission: impl Into<String>) -> Self {
        Self::TenantAdmin(admin_permission.into())
    }

    /// Whether the principal passes this guard
    pub fn check(&self, principal: &Principal, ctx: &AccessContext) -> bool {
        match self {
            Self::SuperAdmin => principal.is_super_admin(),
            Self::TenantAdmin(admin_permission) => principal.can(admin_permission, ctx),
            Self::TenantMember => principal.is_super_admin() || principal.user.tenant_id.is_some(),
            Self::Permission(path) => principal.can(path, ctx),
        }
    }
}
