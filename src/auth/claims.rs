//! Claims bundle handed to token issuance
//!
//! Signing, expiry and header conventions belong to the issuer. This module
//! only shapes the data: it never embeds secrets and never mutates its inputs.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::rbac::EffectivePermissionSet;
use crate::core::models::{Tenant, User};

/// Identity and permission claims for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionClaims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// Tenant ID, `None` for platform accounts
    pub tenant_id: Option<Uuid>,
    /// Tenant slug
    pub tenant_slug: Option<String>,
    /// Platform super admin flag
    pub is_super_admin: bool,
    /// Effective permissions, empty for super admins
    pub permissions: EffectivePermissionSet,
    /// Modules enabled for the tenant, in tenant order
    pub enabled_modules: Vec<String>,
}

impl PermissionClaims {
    /// Package a user's permissions with their tenant context.
    ///
    /// A tenant that is not the user's own is ignored, as is any permission
    /// set passed for a super admin.
    pub fn project(user: &User, tenant: Option<&Tenant>, permissions: EffectivePermissionSet) -> Self {
        let tenant = tenant.filter(|tenant| {
            let matches = user.tenant_id == Some(tenant.id);
            if !matches {
                warn!(
                    "Ignoring tenant {} when projecting claims for user {} of tenant {:?}",
                    tenant.id, user.id, user.tenant_id
                );
            }
            matches
        });

        let permissions = if user.is_super_admin {
            EffectivePermissionSet::new()
        } else {
            permissions
        };

        debug!(
            "Projected claims for user {} with {} permissions",
            user.id,
            permissions.len()
        );

        Self {
            sub: user.id,
            email: user.email.clone(),
            tenant_id: tenant.map(|t| t.id),
            tenant_slug: tenant.map(|t| t.slug.clone()),
            is_super_admin: user.is_super_admin,
            permissions,
            enabled_modules: tenant.map(|t| t.enabled_modules.clone()).unwrap_or_default(),
        }
    }

    /// Whether the bundle carries a tenant
    pub fn has_tenant(&self) -> bool {
        self.tenant_id.is_some()
    }
}
