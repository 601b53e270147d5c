use serde::{Deserialize, Serialize};

use crate::grant::{RolePermission, UserPermission};
use crate::matching::{WILDCARD, resource_matches};

/// Where an effective permission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionSource {
    /// Granted directly to the user.
    User,
    /// Inherited from one of the user's roles.
    Role,
}

impl PermissionSource {
    /// Returns a stable transport value for this source.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
        }
    }
}

/// A grant visible to a user, annotated with its provenance.
///
/// Direct and role grants covering the same resource and action are kept as
/// separate entries so callers can audit every source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectivePermission {
    /// Stored resource id or pattern of the grant.
    pub resource_id: String,
    /// Stored action of the grant.
    pub action: String,
    /// Grant kind.
    pub source: PermissionSource,
    /// Granting user or role id.
    pub source_id: Option<String>,
    /// Creation time of the underlying grant in epoch milliseconds.
    pub created_at: i64,
}

impl From<UserPermission> for EffectivePermission {
    fn from(value: UserPermission) -> Self {
        Self {
            resource_id: value.resource_id,
            action: value.action,
            source: PermissionSource::User,
            source_id: Some(value.user_id),
            created_at: value.created_at,
        }
    }
}

impl From<RolePermission> for EffectivePermission {
    fn from(value: RolePermission) -> Self {
        Self {
            resource_id: value.resource_id,
            action: value.action,
            source: PermissionSource::Role,
            source_id: Some(value.role_id),
            created_at: value.created_at,
        }
    }
}

/// Optional narrowing applied to effective permission listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectivePermissionFilter {
    /// Concrete resource id (or pattern) the grant must cover.
    pub resource_id: Option<String>,
    /// Action the grant must cover.
    pub action: Option<String>,
}

impl EffectivePermissionFilter {
    /// Creates a filter from optional resource and action values.
    #[must_use]
    pub fn new(resource_id: Option<String>, action: Option<String>) -> Self {
        Self {
            resource_id,
            action,
        }
    }

    /// Filter that only narrows by action.
    #[must_use]
    pub fn action_only(action: Option<String>) -> Self {
        Self {
            resource_id: None,
            action,
        }
    }

    /// Returns whether a stored resource pattern passes the resource filter.
    ///
    /// The filter value may itself be a pattern, so literal equality is
    /// accepted next to pattern matching.
    #[must_use]
    pub fn admits_resource(&self, stored_resource_id: &str) -> bool {
        match self.resource_id.as_deref() {
            Some(resource_id) => {
                resource_matches(stored_resource_id, resource_id)
                    || stored_resource_id == resource_id
            }
            None => true,
        }
    }

    /// Returns whether a stored action passes the action filter.
    #[must_use]
    pub fn admits_action(&self, stored_action: &str) -> bool {
        match self.action.as_deref() {
            Some(action) => stored_action == action || stored_action == WILDCARD,
            None => true,
        }
    }

    /// Returns whether a stored grant passes both filters.
    #[must_use]
    pub fn admits(&self, stored_resource_id: &str, stored_action: &str) -> bool {
        self.admits_resource(stored_resource_id) && self.admits_action(stored_action)
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::TenantId;

    use crate::grant::{PermissionInput, RolePermission, UserPermission};

    use super::{EffectivePermission, EffectivePermissionFilter, PermissionSource};

    #[test]
    fn user_grant_is_tagged_with_user_source() {
        let input = PermissionInput::new("/x", "read").unwrap_or_else(|_| unreachable!());
        let grant = UserPermission::new(TenantId::new(), "u1", &input);
        let created_at = grant.created_at;

        let effective = EffectivePermission::from(grant);
        assert_eq!(effective.source, PermissionSource::User);
        assert_eq!(effective.source_id.as_deref(), Some("u1"));
        assert_eq!(effective.created_at, created_at);
    }

    #[test]
    fn role_grant_is_tagged_with_role_source() {
        let input = PermissionInput::new("/api/*", "write").unwrap_or_else(|_| unreachable!());
        let effective = EffectivePermission::from(RolePermission::new(TenantId::new(), "r1", &input));

        assert_eq!(effective.source, PermissionSource::Role);
        assert_eq!(effective.source_id.as_deref(), Some("r1"));
        assert_eq!(effective.source.as_str(), "role");
    }

    #[test]
    fn empty_filter_admits_everything() {
        let filter = EffectivePermissionFilter::default();
        assert!(filter.admits("/anything/*", "delete"));
    }

    #[test]
    fn resource_filter_uses_pattern_matching_and_equality() {
        let filter = EffectivePermissionFilter::new(Some("/india/data".to_owned()), None);
        assert!(filter.admits_resource("/india/*"));
        assert!(filter.admits_resource("/india/data"));
        assert!(!filter.admits_resource("/europe/*"));

        let pattern_filter = EffectivePermissionFilter::new(Some("/india/*".to_owned()), None);
        assert!(pattern_filter.admits_resource("/india/*"));
        assert!(!pattern_filter.admits_resource("/india/data"));
    }

    #[test]
    fn action_filter_accepts_stored_wildcard() {
        let filter = EffectivePermissionFilter::action_only(Some("read".to_owned()));
        assert!(filter.admits_action("read"));
        assert!(filter.admits_action("*"));
        assert!(!filter.admits_action("write"));
    }

    #[test]
    fn source_serializes_in_lowercase() {
        let value = serde_json::to_value(PermissionSource::User).unwrap_or_default();
        assert_eq!(value, "user");
    }
}
