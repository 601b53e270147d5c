use serde::{Deserialize, Serialize};
use tessera_domain::{EffectivePermission, PermissionGrant, RolePermission, UserPermission};

/// Incoming payload for granting an action on a resource pattern.
#[derive(Debug, Deserialize)]
pub struct GrantPermissionRequest {
    pub resource_id: String,
    pub action: String,
}

/// Incoming payload for revoking a grant by its exact key.
#[derive(Debug, Deserialize)]
pub struct RevokePermissionRequest {
    pub resource_id: String,
    pub action: String,
}

/// Result of a revoke request.
#[derive(Debug, Serialize)]
pub struct RevokePermissionResponse {
    pub revoked: bool,
}

/// API representation of a direct user grant.
#[derive(Debug, Serialize)]
pub struct UserPermissionResponse {
    pub user_id: String,
    pub resource_id: String,
    pub action: String,
    pub created_at: i64,
}

/// API representation of a role grant.
#[derive(Debug, Serialize)]
pub struct RolePermissionResponse {
    pub role_id: String,
    pub resource_id: String,
    pub action: String,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct HasPermissionQuery {
    pub resource_id: String,
    pub action: String,
}

#[derive(Debug, Serialize)]
pub struct HasPermissionResponse {
    pub allowed: bool,
}

/// Optional filters for effective permission listing.
#[derive(Debug, Default, Deserialize)]
pub struct EffectivePermissionsQuery {
    pub resource_id: Option<String>,
    pub action: Option<String>,
}

/// Literal stored-prefix scan with an optional action filter.
#[derive(Debug, Deserialize)]
pub struct PrefixPermissionsQuery {
    pub prefix: String,
    pub action: Option<String>,
}

/// API representation of one effective permission entry.
#[derive(Debug, Serialize)]
pub struct EffectivePermissionResponse {
    pub resource_id: String,
    pub action: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct ResourcePermissionsQuery {
    pub resource_id: String,
}

/// One grant stored under an exact resource id, tagged with its subject kind.
#[derive(Debug, Serialize)]
pub struct PermissionGrantResponse {
    pub source: String,
    pub subject_id: String,
    pub resource_id: String,
    pub action: String,
    pub created_at: i64,
}

impl From<UserPermission> for UserPermissionResponse {
    fn from(value: UserPermission) -> Self {
        Self {
            user_id: value.user_id,
            resource_id: value.resource_id,
            action: value.action,
            created_at: value.created_at,
        }
    }
}

impl From<RolePermission> for RolePermissionResponse {
    fn from(value: RolePermission) -> Self {
        Self {
            role_id: value.role_id,
            resource_id: value.resource_id,
            action: value.action,
            created_at: value.created_at,
        }
    }
}

impl From<EffectivePermission> for EffectivePermissionResponse {
    fn from(value: EffectivePermission) -> Self {
        Self {
            resource_id: value.resource_id,
            action: value.action,
            source: value.source.as_str().to_owned(),
            source_id: value.source_id,
            created_at: value.created_at,
        }
    }
}

impl From<PermissionGrant> for PermissionGrantResponse {
    fn from(value: PermissionGrant) -> Self {
        Self {
            source: value.source().as_str().to_owned(),
            subject_id: value.subject_id().to_owned(),
            resource_id: value.resource_id().to_owned(),
            action: value.action().to_owned(),
            created_at: value.created_at(),
        }
    }
}
