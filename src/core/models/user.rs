//! User identity model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user as seen by the permission engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// Owning tenant; `None` for platform-level accounts
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    /// Team the user belongs to, if any
    #[serde(default)]
    pub team_id: Option<Uuid>,
    /// Platform super admin, bypasses every permission check
    #[serde(default)]
    pub is_super_admin: bool,
    /// Roles attached to the user, all belonging to `tenant_id`
    #[serde(default)]
    pub role_ids: Vec<Uuid>,
}

impl User {
    /// Create a new tenant user with no roles
    pub fn new(email: impl Into<String>, tenant_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            tenant_id,
            team_id: None,
            is_super_admin: false,
            role_ids: Vec::new(),
        }
    }

    /// Create a platform super admin
    pub fn super_admin(email: impl Into<String>) -> Self {
        Self {
            is_super_admin: true,
            ..Self::new(email, None)
        }
    }

    /// Check whether a role is attached to the user
    pub fn has_role(&self, role_id: &Uuid) -> bool {
        self.role_ids.contains(role_id)
    }
}
