use serde::{Deserialize, Serialize};
use tessera_domain::UserRole;

/// Incoming payload for adding a user to a role.
#[derive(Debug, Deserialize)]
pub struct AssignRoleRequest {
    pub role_id: String,
}

/// Incoming payload for removing a user from a role.
#[derive(Debug, Deserialize)]
pub struct UnassignRoleRequest {
    pub role_id: String,
}

#[derive(Debug, Serialize)]
pub struct UnassignRoleResponse {
    pub removed: bool,
}

/// API representation of a role membership.
#[derive(Debug, Serialize)]
pub struct UserRoleResponse {
    pub user_id: String,
    pub role_id: String,
    pub created_at: i64,
}

impl From<UserRole> for UserRoleResponse {
    fn from(value: UserRole) -> Self {
        Self {
            user_id: value.user_id,
            role_id: value.role_id,
            created_at: value.created_at,
        }
    }
}
