use async_trait::async_trait;

use tessera_core::{AppResult, TenantId};
use tessera_domain::{
    PermissionInput, ResourcePermissions, RolePermission, UserPermission, UserRole,
};

/// Repository port for user and role grants.
///
/// Every method is scoped by tenant. Listing methods return rows in storage
/// order (creation time, then natural key).
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Stores a user grant, or returns the stored row when the
    /// `(tenant, user, resource, action)` tuple already exists.
    ///
    /// Concurrent grants of one tuple converge to a single row and all succeed.
    async fn grant_user_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        input: &PermissionInput,
    ) -> AppResult<UserPermission>;

    /// Deletes a user grant and returns whether a row was removed.
    async fn revoke_user_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool>;

    /// Lists every direct grant of a user.
    async fn list_user_permissions(
        &self,
        tenant_id: TenantId,
        user_id: &str,
    ) -> AppResult<Vec<UserPermission>>;

    /// Lists direct grants whose stored resource id starts with the literal prefix.
    async fn list_user_permissions_by_prefix(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id_prefix: &str,
    ) -> AppResult<Vec<UserPermission>>;

    /// Stores a role grant, or returns the stored row when the
    /// `(tenant, role, resource, action)` tuple already exists.
    async fn grant_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        input: &PermissionInput,
    ) -> AppResult<RolePermission>;

    /// Deletes a role grant and returns whether a row was removed.
    async fn revoke_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool>;

    /// Lists every grant of a role.
    async fn list_role_permissions(
        &self,
        tenant_id: TenantId,
        role_id: &str,
    ) -> AppResult<Vec<RolePermission>>;

    /// Lists role grants whose stored resource id starts with the literal prefix.
    async fn list_role_permissions_by_prefix(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        resource_id_prefix: &str,
    ) -> AppResult<Vec<RolePermission>>;

    /// Lists grants of both kinds stored with exactly this resource id.
    ///
    /// Patterns are not expanded.
    async fn list_permissions_by_resource(
        &self,
        tenant_id: TenantId,
        resource_id: &str,
    ) -> AppResult<ResourcePermissions>;
}

/// Repository port for user to role membership.
#[async_trait]
pub trait RoleMembershipRepository: Send + Sync {
    /// Lists the role ids of a user in storage order.
    async fn list_role_ids(&self, tenant_id: TenantId, user_id: &str) -> AppResult<Vec<String>>;

    /// Adds a user to a role, or returns the existing membership.
    async fn assign_role(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        role_id: &str,
    ) -> AppResult<UserRole>;

    /// Removes a user from a role and returns whether a row was removed.
    async fn unassign_role(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        role_id: &str,
    ) -> AppResult<bool>;
}
