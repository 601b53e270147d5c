use chrono::Utc;
use serde::{Deserialize, Serialize};
use tessera_core::{AppResult, NonEmptyString, TenantId};

use crate::effective::PermissionSource;

/// Returns the current time as epoch milliseconds, the unit used by every
/// persisted `created_at` value.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Validated resource pattern and action pair for a new grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PermissionInput {
    resource_id: NonEmptyString,
    action: NonEmptyString,
}

impl PermissionInput {
    /// Creates grant input, rejecting blank resource ids and actions.
    pub fn new(resource_id: impl Into<String>, action: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            resource_id: NonEmptyString::new(resource_id)?,
            action: NonEmptyString::new(action)?,
        })
    }

    /// Returns the resource id or pattern.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        self.resource_id.as_str()
    }

    /// Returns the granted action.
    #[must_use]
    pub fn action(&self) -> &str {
        self.action.as_str()
    }
}

/// Direct grant of an action on a resource pattern to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermission {
    /// Tenant owning the grant.
    pub tenant_id: TenantId,
    /// Granted user.
    pub user_id: String,
    /// Resource id or wildcard pattern.
    pub resource_id: String,
    /// Action name or `*`.
    pub action: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl UserPermission {
    /// Creates a grant stamped with the current time.
    #[must_use]
    pub fn new(tenant_id: TenantId, user_id: impl Into<String>, input: &PermissionInput) -> Self {
        Self {
            tenant_id,
            user_id: user_id.into(),
            resource_id: input.resource_id().to_owned(),
            action: input.action().to_owned(),
            created_at: now_millis(),
        }
    }

    /// Returns whether this grant has the given natural key.
    #[must_use]
    pub fn is_tuple(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id: &str,
        action: &str,
    ) -> bool {
        self.tenant_id == tenant_id
            && self.user_id == user_id
            && self.resource_id == resource_id
            && self.action == action
    }
}

/// Grant of an action on a resource pattern to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    /// Tenant owning the grant.
    pub tenant_id: TenantId,
    /// Granted role.
    pub role_id: String,
    /// Resource id or wildcard pattern.
    pub resource_id: String,
    /// Action name or `*`.
    pub action: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl RolePermission {
    /// Creates a grant stamped with the current time.
    #[must_use]
    pub fn new(tenant_id: TenantId, role_id: impl Into<String>, input: &PermissionInput) -> Self {
        Self {
            tenant_id,
            role_id: role_id.into(),
            resource_id: input.resource_id().to_owned(),
            action: input.action().to_owned(),
            created_at: now_millis(),
        }
    }

    /// Returns whether this grant has the given natural key.
    #[must_use]
    pub fn is_tuple(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        resource_id: &str,
        action: &str,
    ) -> bool {
        self.tenant_id == tenant_id
            && self.role_id == role_id
            && self.resource_id == resource_id
            && self.action == action
    }
}

/// Membership of a user in a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRole {
    /// Tenant owning the membership.
    pub tenant_id: TenantId,
    /// Member user.
    pub user_id: String,
    /// Role the user belongs to.
    pub role_id: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl UserRole {
    /// Creates a membership stamped with the current time.
    #[must_use]
    pub fn new(
        tenant_id: TenantId,
        user_id: impl Into<String>,
        role_id: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            user_id: user_id.into(),
            role_id: role_id.into(),
            created_at: now_millis(),
        }
    }
}

/// Stored grant of either kind, tagged with its subject kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum PermissionGrant {
    /// Direct user grant.
    User(UserPermission),
    /// Role grant.
    Role(RolePermission),
}

impl PermissionGrant {
    /// Returns the subject kind of this grant.
    #[must_use]
    pub fn source(&self) -> PermissionSource {
        match self {
            Self::User(_) => PermissionSource::User,
            Self::Role(_) => PermissionSource::Role,
        }
    }

    /// Returns the granted user or role id.
    #[must_use]
    pub fn subject_id(&self) -> &str {
        match self {
            Self::User(grant) => grant.user_id.as_str(),
            Self::Role(grant) => grant.role_id.as_str(),
        }
    }

    /// Returns the creation time in epoch milliseconds.
    #[must_use]
    pub fn created_at(&self) -> i64 {
        match self {
            Self::User(grant) => grant.created_at,
            Self::Role(grant) => grant.created_at,
        }
    }

    /// Returns the stored resource id or pattern.
    #[must_use]
    pub fn resource_id(&self) -> &str {
        match self {
            Self::User(grant) => grant.resource_id.as_str(),
            Self::Role(grant) => grant.resource_id.as_str(),
        }
    }

    /// Returns the stored action.
    #[must_use]
    pub fn action(&self) -> &str {
        match self {
            Self::User(grant) => grant.action.as_str(),
            Self::Role(grant) => grant.action.as_str(),
        }
    }
}

/// Every grant stored with one exact resource id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePermissions {
    /// Direct user grants.
    pub user_permissions: Vec<UserPermission>,
    /// Role grants.
    pub role_permissions: Vec<RolePermission>,
}

impl ResourcePermissions {
    /// Flattens both kinds into one tagged list, user grants first.
    #[must_use]
    pub fn into_grants(self) -> Vec<PermissionGrant> {
        self.user_permissions
            .into_iter()
            .map(PermissionGrant::User)
            .chain(self.role_permissions.into_iter().map(PermissionGrant::Role))
            .collect()
    }
}
