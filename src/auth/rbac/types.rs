//! RBAC type definitions

use crate::config::RbacConfig;
use crate::core::models::User;
use crate::utils::error::{RbacError, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Well-known scope values
pub mod scope {
    pub const OWN: &str = "own";
    pub const TEAM: &str = "team";
    pub const ALL: &str = "all";
}

/// A node of a tenant-authored permissions document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PermissionNode {
    Bool(bool),
    Scope(String),
    Nested(IndexMap<String, PermissionNode>),
    /// Any other JSON value (number, null, array), carried through untouched
    Opaque(serde_json::Value),
}

impl PermissionNode {
    /// Boolean or scope string
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::Scope(_))
    }

    /// Terminal value of this node, `None` for a nested mapping
    pub fn leaf(&self) -> Option<PermissionValue> {
        match self {
            Self::Bool(granted) => Some(PermissionValue::Bool(*granted)),
            Self::Scope(scope) => Some(PermissionValue::Scope(scope.clone())),
            Self::Opaque(value) => Some(PermissionValue::Opaque(value.clone())),
            Self::Nested(_) => None,
        }
    }
}

impl From<serde_json::Value> for PermissionNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(granted) => Self::Bool(granted),
            serde_json::Value::String(scope) => Self::Scope(scope),
            serde_json::Value::Object(map) => Self::Nested(
                map.into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
            other => Self::Opaque(other),
        }
    }
}

impl<'de> Deserialize<'de> for PermissionNode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<bool> for PermissionNode {
    fn from(granted: bool) -> Self {
        Self::Bool(granted)
    }
}

impl From<&str> for PermissionNode {
    fn from(scope: &str) -> Self {
        Self::Scope(scope.to_string())
    }
}

impl From<String> for PermissionNode {
    fn from(scope: String) -> Self {
        Self::Scope(scope)
    }
}

impl From<PermissionValue> for PermissionNode {
    fn from(value: PermissionValue) -> Self {
        match value {
            PermissionValue::Bool(granted) => Self::Bool(granted),
            PermissionValue::Scope(scope) => Self::Scope(scope),
            PermissionValue::Opaque(value) => Self::Opaque(value),
        }
    }
}

/// Terminal value of a flattened permission path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionValue {
    Bool(bool),
    Scope(String),
    Opaque(serde_json::Value),
}

impl PermissionValue {
    pub fn as_scope(&self) -> Option<&str> {
        match self {
            Self::Scope(scope) => Some(scope),
            _ => None,
        }
    }
}

impl From<bool> for PermissionValue {
    fn from(granted: bool) -> Self {
        Self::Bool(granted)
    }
}

impl From<&str> for PermissionValue {
    fn from(scope: &str) -> Self {
        Self::Scope(scope.to_string())
    }
}

/// Nested `module -> resource -> action -> value` document stored on a role.
///
/// Sparse: undeclared paths mean no access. Keys outside the schema (such as
/// `admin.full_access`) are kept and propagated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PermissionsDocument(IndexMap<String, PermissionNode>);

impl PermissionsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a JSON value, which must be an object
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match PermissionNode::from(value) {
            PermissionNode::Nested(entries) => Ok(Self(entries)),
            _ => Err(RbacError::validation("Permissions must be a JSON object")),
        }
    }

    /// Set the value at a dotted path, creating intermediate mappings.
    ///
    /// A scalar sitting where a mapping is needed is replaced.
    pub fn grant(mut self, path: &str, value: impl Into<PermissionNode>) -> Self {
        let segments: Vec<&str> = path.split('.').collect();
        insert_path(&mut self.0, &segments, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&PermissionNode> {
        self.0.get(key)
    }

    pub fn entries(&self) -> &IndexMap<String, PermissionNode> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for PermissionsDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(serde::de::Error::custom)
    }
}

/// Flat mapping from dotted path to terminal value
pub type FlatPermissionMap = IndexMap<String, PermissionValue>;

/// Merged permissions of one user at one point in time.
///
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectivePermissionSet(FlatPermissionMap);

impl EffectivePermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&PermissionValue> {
        self.0.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<FlatPermissionMap> for EffectivePermissionSet {
    fn from(map: FlatPermissionMap) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<PermissionValue>> FromIterator<(K, V)> for EffectivePermissionSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(path, value)| (path.into(), value.into()))
                .collect(),
        )
    }
}

/// Role definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Role ID
    pub id: Uuid,
    /// Owning tenant
    pub tenant_id: Uuid,
    /// Role name, unique per tenant
    pub name: String,
    /// Role description
    #[serde(default)]
    pub description: String,
    /// Nested permission grants
    #[serde(default)]
    pub permissions: PermissionsDocument,
    /// Inactive roles contribute nothing
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// User who created the role
    #[serde(default)]
    pub created_by: Option<Uuid>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Create an active role
    pub fn new(tenant_id: Uuid, name: impl Into<String>, permissions: PermissionsDocument) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.into(),
            description: String::new(),
            permissions,
            is_active: true,
            created_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The role every tenant starts with: a single escape-hatch grant
    pub fn tenant_admin(tenant_id: Uuid, created_by: Option<Uuid>, config: &RbacConfig) -> Self {
        let permissions = PermissionsDocument::new().grant(&config.admin_permission, true);
        Self {
            description: "Full access to all features".to_string(),
            created_by,
            ..Self::new(tenant_id, config.admin_role_name.clone(), permissions)
        }
    }

    /// Replace the permissions document
    pub fn set_permissions(&mut self, permissions: PermissionsDocument) {
        self.permissions = permissions;
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
        self.updated_at = Utc::now();
    }
}

/// Request-specific facts for scope evaluation.
///
/// Identifiers are compared as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessContext {
    pub resource_owner_id: Option<String>,
    pub actor_id: Option<String>,
    pub actor_team_id: Option<String>,
}

impl AccessContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with the acting user's identity and team filled in
    pub fn for_user(user: &User) -> Self {
        Self {
            resource_owner_id: None,
            actor_id: Some(user.id.to_string()),
            actor_team_id: user.team_id.map(|team| team.to_string()),
        }
    }

    pub fn owned_by(mut self, owner: impl Display) -> Self {
        self.resource_owner_id = Some(owner.to_string());
        self
    }

    pub fn actor(mut self, actor: impl Display) -> Self {
        self.actor_id = Some(actor.to_string());
        self
    }

    pub fn team(mut self, team: impl Display) -> Self {
        self.actor_team_id = Some(team.to_string());
        self
    }
}

/// Permission check result
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionCheck {
    /// Whether permission is granted
    pub granted: bool,
    /// Path that was checked
    pub path: String,
    /// Value found in the effective set, if any
    pub value: Option<PermissionValue>,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}

fn insert_path(level: &mut IndexMap<String, PermissionNode>, segments: &[&str], value: PermissionNode) {
    match segments {
        [] => {}
        [last] => {
            level.insert(last.to_string(), value);
        }
        [head, rest @ ..] => {
            let node = level
                .entry(head.to_string())
                .or_insert_with(|| PermissionNode::Nested(IndexMap::new()));
            if let PermissionNode::Nested(children) = node {
                insert_path(children, rest, value);
            } else {
                let mut children = IndexMap::new();
                insert_path(&mut children, rest, value);
                *node = PermissionNode::Nested(children);
            }
        }
    }
}

fn default_true() -> bool {
    true
}
