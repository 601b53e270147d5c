use serde::Serialize;

mod permissions;
mod roles;

pub use permissions::{
    EffectivePermissionResponse, EffectivePermissionsQuery, GrantPermissionRequest,
    HasPermissionQuery, HasPermissionResponse, PermissionGrantResponse, PrefixPermissionsQuery,
    ResourcePermissionsQuery, RevokePermissionRequest, RevokePermissionResponse,
    RolePermissionResponse, UserPermissionResponse,
};
pub use roles::{AssignRoleRequest, UnassignRoleRequest, UnassignRoleResponse, UserRoleResponse};

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ready: bool,
    pub postgres: HealthDependencyStatus,
}

/// Health of one backing dependency.
#[derive(Debug, Serialize)]
pub struct HealthDependencyStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
