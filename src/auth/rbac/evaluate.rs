//! Access decisions against an effective permission set

use super::types::{AccessContext, EffectivePermissionSet, PermissionValue, scope};
use crate::core::models::User;

/// Decide whether the effective set allows `path` in `ctx`.
///
/// - absent path: deny
/// - boolean: the boolean
/// - `"all"`: allow
/// - `"team"`: allow; team membership is not checked here
/// - `"own"`: allow when the owner is absent or empty, otherwise only when the
///   actor equals the owner exactly (no trimming; a missing actor denies)
/// - any other value: deny
pub fn authorize(permissions: &EffectivePermissionSet, path: &str, ctx: &AccessContext) -> bool {
    match permissions.get(path) {
        None => false,
        Some(value) => value_allows(value, ctx),
    }
}

/// [`authorize`] preceded by the super-admin bypass
pub fn authorize_user(
    user: &User,
    permissions: &EffectivePermissionSet,
    path: &str,
    ctx: &AccessContext,
) -> bool {
    user.is_super_admin || authorize(permissions, path, ctx)
}

pub(super) fn value_allows(value: &PermissionValue, ctx: &AccessContext) -> bool {
    match value {
        PermissionValue::Bool(granted) => *granted,
        PermissionValue::Scope(level) => match level.as_str() {
            scope::ALL | scope::TEAM => true,
            scope::OWN => owns_resource(ctx),
            _ => false,
        },
        PermissionValue::Opaque(_) => false,
    }
}

/// An absent or empty owner allows; callers that need the restriction must supply it
fn owns_resource(ctx: &AccessContext) -> bool {
    match ctx.resource_owner_id.as_deref() {
        None | Some("") => true,
        Some(owner) => ctx.actor_id.as_deref() == Some(owner),
    }
}
