//! Validators for the permission engine and logging configuration

use super::trait_def::Validate;
use crate::config::models::*;
use crate::utils::logging::LogLevel;
use std::collections::HashSet;
use tracing::debug;

/// Check that `path` is a dotted permission path with no empty segment
pub fn validate_permission_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Permission path cannot be empty".to_string());
    }
    if path.split('.').any(str::is_empty) {
        return Err(format!("Permission path '{}' has an empty segment", path));
    }
    Ok(())
}

impl Validate for RbacConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating RBAC configuration");

        if self.admin_role_name.trim().is_empty() {
            return Err("Admin role name cannot be empty".to_string());
        }

        validate_permission_path(&self.admin_permission)?;

        let mut seen = HashSet::new();
        for module in &self.default_enabled_modules {
            if module.trim().is_empty() {
                return Err("Enabled module keys cannot be empty".to_string());
            }
            if !seen.insert(module.as_str()) {
                return Err(format!("Duplicate enabled module: {}", module));
            }
        }

        if let Some(path) = &self.schema_path {
            if path.as_os_str().is_empty() {
                return Err("Schema path cannot be empty when set".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        self.level
            .parse::<LogLevel>()
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
