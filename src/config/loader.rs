//! Environment overrides for configuration

use super::Config;
use crate::utils::error::{RbacError, Result};
use std::env;
use std::path::PathBuf;
use tracing::debug;

impl Config {
    /// Apply `RBAC_*` environment variables on top of this configuration
    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    pub(crate) fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("RBAC_SCHEMA_PATH") {
            self.rbac.schema_path = Some(PathBuf::from(path));
        }
        if let Some(name) = lookup("RBAC_ADMIN_ROLE") {
            self.rbac.admin_role_name = name;
        }
        if let Some(permission) = lookup("RBAC_ADMIN_PERMISSION") {
            self.rbac.admin_permission = permission;
        }
        if let Some(modules) = lookup("RBAC_DEFAULT_MODULES") {
            self.rbac.default_enabled_modules = modules
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(level) = lookup("RBAC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("RBAC_LOG_JSON") {
            self.logging.json = json
                .parse()
                .map_err(|e| RbacError::Config(format!("Invalid RBAC_LOG_JSON flag: {}", e)))?;
        }

        debug!("Configuration environment overrides applied");
        Ok(self)
    }
}
