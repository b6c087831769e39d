//! RBAC system core functionality

use std::sync::Arc;

use tracing::{debug, info};

use super::evaluate::value_allows;
use super::guards::{AccessPolicy, Principal};
use super::merge::merge;
use super::types::{AccessContext, EffectivePermissionSet, PermissionCheck, Role};
use crate::auth::claims::PermissionClaims;
use crate::auth::schema::PermissionSchema;
use crate::config::RbacConfig;
use crate::core::models::{Tenant, User};
use crate::utils::error::{RbacError, Result};

/// Entry point tying configuration and the shared schema to the engine operations.
///
/// Holds no mutable state; clones share the same schema.
#[derive(Debug, Clone)]
pub struct RbacSystem {
    /// RBAC configuration
    pub(super) config: RbacConfig,
    /// Permission catalog, immutable after construction
    pub(super) schema: Arc<PermissionSchema>,
}

impl RbacSystem {
    /// Create a new RBAC system, loading the schema named by the configuration
    pub async fn new(config: &RbacConfig) -> Result<Self> {
        info!("Initializing RBAC system");

        let schema = match &config.schema_path {
            Some(path) => PermissionSchema::load(path).await?,
            None => PermissionSchema::builtin(),
        };

        let rbac = Self::with_schema(config, Arc::new(schema))?;

        info!(
            "RBAC system initialized with {} modules",
            rbac.schema.modules().len()
        );
        Ok(rbac)
    }

    /// Create an RBAC system around an already loaded schema
    pub fn with_schema(config: &RbacConfig, schema: Arc<PermissionSchema>) -> Result<Self> {
        schema.validate()?;
        Ok(Self {
            config: config.clone(),
            schema,
        })
    }

    pub fn config(&self) -> &RbacConfig {
        &self.config
    }

    pub fn schema(&self) -> &Arc<PermissionSchema> {
        &self.schema
    }

    /// Merge the given roles for `user`; super admins get an empty set
    pub fn effective_permissions(&self, user: &User, roles: &[Role]) -> EffectivePermissionSet {
        if user.is_super_admin {
            debug!("Skipping permission merge for super admin {}", user.id);
            return EffectivePermissionSet::new();
        }
        merge(roles, &self.schema)
    }

    /// Resolve the principal for a request
    pub fn principal(&self, user: &User, roles: &[Role]) -> Principal {
        Principal::new(user.clone(), self.effective_permissions(user, roles))
    }

    /// Check a permission path for a principal
    pub fn authorize(&self, principal: &Principal, path: &str, ctx: &AccessContext) -> bool {
        AccessPolicy::permission(path).check(principal, ctx)
    }

    /// Check whether the principal administers their tenant
    pub fn is_tenant_admin(&self, principal: &Principal) -> bool {
        AccessPolicy::tenant_admin(self.config.admin_permission.clone())
            .check(principal, &AccessContext::for_user(&principal.user))
    }

    /// Detailed permission check
    pub fn check_permission_detailed(
        &self,
        principal: &Principal,
        path: &str,
        ctx: &AccessContext,
    ) -> PermissionCheck {
        let value = principal.permissions.get(path).cloned();

        if principal.is_super_admin() {
            return PermissionCheck {
                granted: true,
                path: path.to_string(),
                value,
                denial_reason: None,
            };
        }

        let denial_reason = match &value {
            None => Some(format!("Missing permission: {}", path)),
            Some(found) if value_allows(found, ctx) => None,
            Some(found) => Some(format!("Permission {} does not allow access: {:?}", path, found)),
        };

        PermissionCheck {
            granted: denial_reason.is_none(),
            path: path.to_string(),
            value,
            denial_reason,
        }
    }

    /// Fail with [`RbacError::Authorization`] carrying the denial reason
    pub fn require(&self, principal: &Principal, path: &str, ctx: &AccessContext) -> Result<()> {
        let check = self.check_permission_detailed(principal, path, ctx);
        match check.denial_reason {
            None => Ok(()),
            Some(reason) => {
                debug!("Denied {} for user {}", path, principal.user.id);
                Err(RbacError::authorization(reason))
            }
        }
    }

    /// Build the claims bundle handed to token issuance
    pub fn project_claims(&self, user: &User, tenant: Option<&Tenant>, roles: &[Role]) -> PermissionClaims {
        PermissionClaims::project(user, tenant, self.effective_permissions(user, roles))
    }
}
