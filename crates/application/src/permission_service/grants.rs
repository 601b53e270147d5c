use tessera_domain::{PermissionInput, ResourcePermissions, RolePermission, UserPermission};
use tracing::info;

use super::*;

impl PermissionService {
    /// Grants an action on a resource pattern to a user.
    ///
    /// Granting an existing tuple is a no-op that returns the stored grant.
    pub async fn grant_user_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        input: PermissionInput,
    ) -> AppResult<UserPermission> {
        require_subject_id("user", user_id)?;

        let grant = self
            .permission_repository
            .grant_user_permission(tenant_id, user_id, &input)
            .await?;

        info!(
            %tenant_id,
            user_id,
            resource_id = input.resource_id(),
            action = input.action(),
            created_at = grant.created_at,
            "user permission granted"
        );

        Ok(grant)
    }

    /// Revokes a user grant and returns whether one existed.
    pub async fn revoke_user_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool> {
        let revoked = self
            .permission_repository
            .revoke_user_permission(tenant_id, user_id, resource_id, action)
            .await?;

        info!(
            %tenant_id,
            user_id,
            resource_id,
            action,
            revoked,
            "user permission revoke processed"
        );

        Ok(revoked)
    }

    /// Lists raw direct grants for a user without pattern expansion.
    pub async fn user_permissions(
        &self,
        tenant_id: TenantId,
        user_id: &str,
    ) -> AppResult<Vec<UserPermission>> {
        self.permission_repository
            .list_user_permissions(tenant_id, user_id)
            .await
    }

    /// Grants an action on a resource pattern to a role.
    ///
    /// Granting an existing tuple is a no-op that returns the stored grant.
    pub async fn grant_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        input: PermissionInput,
    ) -> AppResult<RolePermission> {
        require_subject_id("role", role_id)?;

        let grant = self
            .permission_repository
            .grant_role_permission(tenant_id, role_id, &input)
            .await?;

        info!(
            %tenant_id,
            role_id,
            resource_id = input.resource_id(),
            action = input.action(),
            created_at = grant.created_at,
            "role permission granted"
        );

        Ok(grant)
    }

    /// Revokes a role grant and returns whether one existed.
    pub async fn revoke_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool> {
        let revoked = self
            .permission_repository
            .revoke_role_permission(tenant_id, role_id, resource_id, action)
            .await?;

        info!(
            %tenant_id,
            role_id,
            resource_id,
            action,
            revoked,
            "role permission revoke processed"
        );

        Ok(revoked)
    }

    /// Lists raw grants for a role without pattern expansion.
    pub async fn role_permissions(
        &self,
        tenant_id: TenantId,
        role_id: &str,
    ) -> AppResult<Vec<RolePermission>> {
        self.permission_repository
            .list_role_permissions(tenant_id, role_id)
            .await
    }

    /// Returns every grant stored with exactly this resource id.
    ///
    /// Answers "who was granted X" and does not expand wildcard patterns.
    pub async fn permissions_by_resource(
        &self,
        tenant_id: TenantId,
        resource_id: &str,
    ) -> AppResult<ResourcePermissions> {
        self.permission_repository
            .list_permissions_by_resource(tenant_id, resource_id)
            .await
    }
}
