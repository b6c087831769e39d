//! Tenant model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer organisation owning users, roles and enabled modules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    /// Tenant ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Unique URL-safe identifier
    pub slug: String,
    /// Modules the tenant has switched on, in display order
    #[serde(default)]
    pub enabled_modules: Vec<String>,
    /// Whether the tenant is active
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Tenant {
    /// Create a new active tenant
    pub fn new(name: impl Into<String>, slug: impl Into<String>, enabled_modules: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
            enabled_modules,
            is_active: true,
        }
    }

    /// Check whether a module is enabled for this tenant
    pub fn has_module(&self, module: &str) -> bool {
        self.enabled_modules.iter().any(|m| m == module)
    }
}

fn default_true() -> bool {
    true
}
