//! Nested document to flat dotted-path map

use indexmap::IndexMap;

use super::types::{FlatPermissionMap, PermissionNode, PermissionsDocument};

/// Flatten a permissions document into `path -> value`.
///
/// A mapping whose values are all booleans or strings is an action set: each
/// entry becomes `prefix.key`. Any other mapping is walked further. Scalars met
/// directly (including opaque values) become leaves at their own path. An empty
/// mapping counts as an action set with no actions and yields nothing. Keys are
/// visited in authored order, so colliding paths keep the last value written.
///
/// The terminal test looks only at immediate values, so a resource whose
/// actions mix scalars with a nested map is walked rather than emitted, and
/// the nested map's leaves land one level deeper.
pub fn flatten(document: &PermissionsDocument) -> FlatPermissionMap {
    let mut flat = FlatPermissionMap::new();
    walk(document.entries(), "", &mut flat);
    flat
}

fn walk(entries: &IndexMap<String, PermissionNode>, prefix: &str, flat: &mut FlatPermissionMap) {
    for (key, node) in entries {
        let path = join(prefix, key);
        match node {
            PermissionNode::Nested(children) if is_action_set(children) => {
                for (action, value) in children {
                    if let Some(leaf) = value.leaf() {
                        flat.insert(join(&path, action), leaf);
                    }
                }
            }
            PermissionNode::Nested(children) => walk(children, &path, flat),
            scalar => {
                if let Some(leaf) = scalar.leaf() {
                    flat.insert(path, leaf);
                }
            }
        }
    }
}

fn is_action_set(children: &IndexMap<String, PermissionNode>) -> bool {
    children.values().all(PermissionNode::is_scalar)
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}
