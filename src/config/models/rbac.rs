//! Permission engine configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Permission engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Schema file (JSON or YAML) replacing the built-in permission catalog
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
    /// Name of the role created when a tenant is bootstrapped
    #[serde(default = "default_admin_role_name")]
    pub admin_role_name: String,
    /// Escape-hatch permission path granting blanket tenant administration
    #[serde(default = "default_admin_permission")]
    pub admin_permission: String,
    /// Modules enabled for a new tenant when none are requested
    #[serde(default = "default_enabled_modules")]
    pub default_enabled_modules: Vec<String>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            schema_path: None,
            admin_role_name: default_admin_role_name(),
            admin_permission: default_admin_permission(),
            default_enabled_modules: default_enabled_modules(),
        }
    }
}

impl RbacConfig {
    /// Merge RBAC configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.schema_path.is_some() {
            self.schema_path = other.schema_path;
        }
        if other.admin_role_name != default_admin_role_name() {
            self.admin_role_name = other.admin_role_name;
        }
        if other.admin_permission != default_admin_permission() {
            self.admin_permission = other.admin_permission;
        }
        if other.default_enabled_modules != default_enabled_modules() {
            self.default_enabled_modules = other.default_enabled_modules;
        }
        self
    }
}

fn default_admin_role_name() -> String {
    "Admin".to_string()
}

fn default_admin_permission() -> String {
    "admin.full_access".to_string()
}

fn default_enabled_modules() -> Vec<String> {
    vec![
        "crm".to_string(),
        "whatsapp".to_string(),
        "meetings".to_string(),
    ]
}
