//! Role management methods

use tracing::{debug, warn};
use uuid::Uuid;

use super::system::RbacSystem;
use super::types::{PermissionsDocument, Role};
use crate::core::models::{Tenant, User};
use crate::utils::error::{RbacError, Result};

impl RbacSystem {
    /// Create a tenant with its admin role, attaching the role to `admin`.
    ///
    /// An empty module list falls back to the configured defaults.
    pub fn bootstrap_tenant(
        &self,
        name: &str,
        slug: &str,
        enabled_modules: Vec<String>,
        admin: &mut User,
    ) -> (Tenant, Role) {
        let modules = if enabled_modules.is_empty() {
            self.config.default_enabled_modules.clone()
        } else {
            enabled_modules
        };

        let tenant = Tenant::new(name, slug, modules);
        let role = Role::tenant_admin(tenant.id, Some(admin.id), &self.config);

        admin.tenant_id = Some(tenant.id);
        admin.role_ids = vec![role.id];

        debug!("Bootstrapped tenant {} with role {}", tenant.slug, role.name);
        (tenant, role)
    }

    /// Fail when `tenant_id` already has a role called `name`
    pub fn ensure_unique_role_name(&self, existing: &[Role], tenant_id: Uuid, name: &str) -> Result<()> {
        if existing
            .iter()
            .any(|role| role.tenant_id == tenant_id && role.name == name)
        {
            return Err(RbacError::conflict(format!(
                "Role '{}' already exists for this tenant",
                name
            )));
        }
        Ok(())
    }

    /// Create a role after checking name uniqueness within the tenant
    pub fn create_role(
        &self,
        existing: &[Role],
        tenant_id: Uuid,
        name: &str,
        permissions: PermissionsDocument,
        created_by: Option<Uuid>,
    ) -> Result<Role> {
        if name.trim().is_empty() {
            return Err(RbacError::validation("Role name cannot be empty"));
        }
        self.ensure_unique_role_name(existing, tenant_id, name)?;

        let mut role = Role::new(tenant_id, name, permissions);
        role.created_by = created_by;
        Ok(role)
    }

    /// Replace the user's roles with the candidates from the user's own tenant.
    ///
    /// Roles of other tenants are dropped. Returns the number attached.
    pub fn assign_roles(&self, user: &mut User, candidates: &[Role]) -> usize {
        let Some(tenant_id) = user.tenant_id else {
            warn!("User {} has no tenant; no roles assigned", user.id);
            user.role_ids.clear();
            return 0;
        };

        let mut role_ids = Vec::with_capacity(candidates.len());
        for role in candidates {
            if role.tenant_id != tenant_id {
                warn!(
                    "Refusing to assign role {} of tenant {} to user {} of tenant {}",
                    role.id, role.tenant_id, user.id, tenant_id
                );
                continue;
            }
            if !role_ids.contains(&role.id) {
                role_ids.push(role.id);
            }
        }

        user.role_ids = role_ids;
        user.role_ids.len()
    }

    /// Detach a role from the user; returns whether it was attached
    pub fn remove_role(&self, user: &mut User, role_id: Uuid) -> bool {
        let before = user.role_ids.len();
        user.role_ids.retain(|id| *id != role_id);
        before != user.role_ids.len()
    }

    /// The user's attached roles from `roles`, limited to the user's tenant, in input order
    pub fn roles_for_user(&self, user: &User, roles: &[Role]) -> Vec<Role> {
        let Some(tenant_id) = user.tenant_id else {
            return Vec::new();
        };
        roles
            .iter()
            .filter(|role| role.tenant_id == tenant_id && user.has_role(&role.id))
            .cloned()
            .collect()
    }
}
