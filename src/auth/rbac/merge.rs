//! Combining the flattened grants of several roles

use std::cmp::Ordering;

use indexmap::map::Entry;
use tracing::{debug, warn};

use super::flatten::flatten;
use super::types::{EffectivePermissionSet, FlatPermissionMap, PermissionValue, Role};
use crate::auth::schema::PermissionSchema;

/// Merge the active roles, in order, into one effective permission set.
///
/// Conflicts on the same path resolve as:
/// - boolean vs boolean: logical OR
/// - scope vs scope: higher rank wins, ties keep the existing value
/// - anything else (mixed types, opaque values): the later role overwrites
pub fn merge<'a, I>(roles: I, schema: &PermissionSchema) -> EffectivePermissionSet
where
    I: IntoIterator<Item = &'a Role>,
{
    let mut merged = FlatPermissionMap::new();
    let mut merged_roles = 0usize;

    for role in roles {
        if !role.is_active {
            debug!("Skipping inactive role {} ({})", role.name, role.id);
            continue;
        }
        fold(&mut merged, flatten(&role.permissions), schema);
        merged_roles += 1;
    }

    debug!(
        "Merged {} active roles into {} permission paths",
        merged_roles,
        merged.len()
    );
    EffectivePermissionSet::from(merged)
}

/// Fold one flat map into the accumulator
fn fold(merged: &mut FlatPermissionMap, incoming: FlatPermissionMap, schema: &PermissionSchema) {
    for (path, value) in incoming {
        match merged.entry(path) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => {
                let resolved = resolve(slot.key(), slot.get(), value, schema);
                if let Some(resolved) = resolved {
                    slot.insert(resolved);
                }
            }
        }
    }
}

/// Decide the value for a contested path; `None` keeps the existing value
fn resolve(
    path: &str,
    existing: &PermissionValue,
    incoming: PermissionValue,
    schema: &PermissionSchema,
) -> Option<PermissionValue> {
    match (existing, incoming) {
        (PermissionValue::Bool(current), PermissionValue::Bool(next)) => {
            Some(PermissionValue::Bool(*current || next))
        }
        (PermissionValue::Scope(current), PermissionValue::Scope(next)) => {
            match compare_scopes(path, current, &next, schema) {
                Ordering::Greater => Some(PermissionValue::Scope(next)),
                Ordering::Less | Ordering::Equal => None,
            }
        }
        (_, other) => {
            warn!("Conflicting value types at {}: later role overwrites", path);
            Some(other)
        }
    }
}

/// Ordering of `next` relative to `current`
fn compare_scopes(path: &str, current: &str, next: &str, schema: &PermissionSchema) -> Ordering {
    let next_rank = schema.scope_rank(path, next);
    if next_rank == 0 {
        warn!("Unranked scope '{}' at {} loses the merge", next, path);
    }
    next_rank.cmp(&schema.scope_rank(path, current))
}
