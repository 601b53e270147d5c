//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod effective;
mod grant;
mod matching;

pub use effective::{EffectivePermission, EffectivePermissionFilter, PermissionSource};
pub use grant::{
    PermissionGrant, PermissionInput, ResourcePermissions, RolePermission, UserPermission,
    UserRole, now_millis,
};
pub use matching::{WILDCARD, action_matches, grant_applies, resource_matches};
