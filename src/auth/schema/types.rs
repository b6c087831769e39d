//! Schema type definitions

use crate::utils::error::{RbacError, Result};
use indexmap::IndexMap;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

/// Rank table used when an action is not declared as a scope in the schema
const FALLBACK_SCOPE_RANKS: [(&str, usize); 3] = [("own", 1), ("team", 2), ("all", 3)];

/// Value type accepted by an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionDescriptor {
    /// Granted or not
    Boolean,
    /// Granted at one of `options`, listed weakest first
    Scope { options: Vec<String> },
}

impl ActionDescriptor {
    /// Build a scope descriptor from options ordered weakest first
    pub fn scope<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Scope {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this action takes a scope value
    pub fn is_scope(&self) -> bool {
        matches!(self, Self::Scope { .. })
    }
}

/// A resource (entity type) within a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub label: String,
    #[serde(deserialize_with = "unique_keys")]
    pub actions: IndexMap<String, ActionDescriptor>,
}

impl ResourceDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            actions: IndexMap::new(),
        }
    }

    /// Declare a boolean action
    pub fn boolean(mut self, action: impl Into<String>) -> Self {
        self.actions.insert(action.into(), ActionDescriptor::Boolean);
        self
    }

    /// Declare a scoped action with options ordered weakest first
    pub fn scope(mut self, action: impl Into<String>, options: &[&str]) -> Self {
        self.actions
            .insert(action.into(), ActionDescriptor::scope(options.iter().copied()));
        self
    }
}

/// A top-level feature area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub label: String,
    #[serde(deserialize_with = "unique_keys")]
    pub resources: IndexMap<String, ResourceDescriptor>,
}

impl ModuleDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            resources: IndexMap::new(),
        }
    }

    pub fn resource(mut self, key: impl Into<String>, resource: ResourceDescriptor) -> Self {
        self.resources.insert(key.into(), resource);
        self
    }
}

/// Ordered catalog of modules, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PermissionSchema {
    modules: IndexMap<String, ModuleDescriptor>,
}

impl<'de> Deserialize<'de> for PermissionSchema {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self {
            modules: unique_keys(deserializer)?,
        })
    }
}

impl PermissionSchema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module; a repeated key replaces the earlier module
    pub fn module(mut self, key: impl Into<String>, module: ModuleDescriptor) -> Self {
        self.modules.insert(key.into(), module);
        self
    }

    pub fn modules(&self) -> &IndexMap<String, ModuleDescriptor> {
        &self.modules
    }

    /// Module keys in declaration order
    pub fn module_keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Look up the descriptor for a `module.resource.action` path
    pub fn action(&self, path: &str) -> Option<&ActionDescriptor> {
        let mut segments = path.split('.');
        let (module, resource, action) = (segments.next()?, segments.next()?, segments.next()?);
        if segments.next().is_some() {
            return None;
        }
        self.modules
            .get(module)?
            .resources
            .get(resource)?
            .actions
            .get(action)
    }

    /// Whether the path is declared
    pub fn contains(&self, path: &str) -> bool {
        self.action(path).is_some()
    }

    /// Every declared dotted path, in declaration order
    pub fn paths(&self) -> Vec<String> {
        self.modules
            .iter()
            .flat_map(|(module_key, module)| {
                module.resources.iter().flat_map(move |(resource_key, resource)| {
                    resource
                        .actions
                        .keys()
                        .map(move |action| format!("{}.{}.{}", module_key, resource_key, action))
                })
            })
            .collect()
    }

    /// Rank of a scope value at `path`; 0 means unranked and always loses.
    ///
    /// Uses the declared option order when the action is a scope in this
    /// schema, otherwise the fixed `own < team < all` table.
    pub fn scope_rank(&self, path: &str, value: &str) -> usize {
        match self.action(path) {
            Some(ActionDescriptor::Scope { options }) => options
                .iter()
                .position(|option| option == value)
                .map_or(0, |index| index + 1),
            _ => FALLBACK_SCOPE_RANKS
                .iter()
                .find(|(name, _)| *name == value)
                .map_or(0, |(_, rank)| *rank),
        }
    }

    /// Structural checks run once at load time
    pub fn validate(&self) -> Result<()> {
        for (module_key, module) in &self.modules {
            check_key("module", module_key)?;
            check_label(module_key, &module.label)?;

            for (resource_key, resource) in &module.resources {
                let resource_path = format!("{}.{}", module_key, resource_key);
                check_key("resource", resource_key)?;
                check_label(&resource_path, &resource.label)?;

                for (action_key, action) in &resource.actions {
                    check_key("action", action_key)?;
                    if let ActionDescriptor::Scope { options } = action {
                        check_scope_options(&format!("{}.{}", resource_path, action_key), options)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Discovery rendering of the schema
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn check_key(kind: &str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(RbacError::schema(format!("Empty {} key", kind)));
    }
    if key.contains('.') {
        return Err(RbacError::schema(format!(
            "{} key '{}' must not contain '.'",
            kind, key
        )));
    }
    Ok(())
}

fn check_label(path: &str, label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(RbacError::schema(format!("Missing label for '{}'", path)));
    }
    Ok(())
}

fn check_scope_options(path: &str, options: &[String]) -> Result<()> {
    if options.is_empty() {
        return Err(RbacError::schema(format!(
            "Scope action '{}' declares no options",
            path
        )));
    }
    let mut seen = HashSet::new();
    for option in options {
        if option.is_empty() {
            return Err(RbacError::schema(format!(
                "Scope action '{}' has an empty option",
                path
            )));
        }
        if !seen.insert(option.as_str()) {
            return Err(RbacError::schema(format!(
                "Scope action '{}' repeats option '{}'",
                path, option
            )));
        }
    }
    Ok(())
}

/// Deserialize a string-keyed map, rejecting repeated keys
fn unique_keys<'de, D, V>(deserializer: D) -> std::result::Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct UniqueKeys<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for UniqueKeys<V> {
        type Value = IndexMap<String, V>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map with unique keys")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, value)) = access.next_entry::<String, V>()? {
                if map.contains_key(&key) {
                    return Err(de::Error::custom(format!("duplicate key '{}'", key)));
                }
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(UniqueKeys(PhantomData))
}
