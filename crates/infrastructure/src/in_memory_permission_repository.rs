use async_trait::async_trait;
use tokio::sync::RwLock;

use tessera_application::PermissionRepository;
use tessera_core::{AppResult, TenantId};
use tessera_domain::{PermissionInput, ResourcePermissions, RolePermission, UserPermission};

#[cfg(test)]
mod tests;

/// In-memory permission repository implementation.
///
/// Rows are kept in insertion order, which doubles as storage order.
#[derive(Debug, Default)]
pub struct InMemoryPermissionRepository {
    user_permissions: RwLock<Vec<UserPermission>>,
    role_permissions: RwLock<Vec<RolePermission>>,
}

impl InMemoryPermissionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PermissionRepository for InMemoryPermissionRepository {
    async fn grant_user_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        input: &PermissionInput,
    ) -> AppResult<UserPermission> {
        let mut rows = self.user_permissions.write().await;
        if let Some(existing) = rows
            .iter()
            .find(|row| row.is_tuple(tenant_id, user_id, input.resource_id(), input.action()))
        {
            return Ok(existing.clone());
        }

        let permission = UserPermission::new(tenant_id, user_id, input);
        rows.push(permission.clone());
        Ok(permission)
    }

    async fn revoke_user_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool> {
        let mut rows = self.user_permissions.write().await;
        let before = rows.len();
        rows.retain(|row| !row.is_tuple(tenant_id, user_id, resource_id, action));
        Ok(rows.len() != before)
    }

    async fn list_user_permissions(
        &self,
        tenant_id: TenantId,
        user_id: &str,
    ) -> AppResult<Vec<UserPermission>> {
        Ok(self
            .user_permissions
            .read()
            .await
            .iter()
            .filter(|row| row.tenant_id == tenant_id && row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_user_permissions_by_prefix(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id_prefix: &str,
    ) -> AppResult<Vec<UserPermission>> {
        Ok(self
            .user_permissions
            .read()
            .await
            .iter()
            .filter(|row| {
                row.tenant_id == tenant_id
                    && row.user_id == user_id
                    && row.resource_id.starts_with(resource_id_prefix)
            })
            .cloned()
            .collect())
    }

    async fn grant_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        input: &PermissionInput,
    ) -> AppResult<RolePermission> {
        let mut rows = self.role_permissions.write().await;
        if let Some(existing) = rows
            .iter()
            .find(|row| row.is_tuple(tenant_id, role_id, input.resource_id(), input.action()))
        {
            return Ok(existing.clone());
        }

        let permission = RolePermission::new(tenant_id, role_id, input);
        rows.push(permission.clone());
        Ok(permission)
    }

    async fn revoke_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool> {
        let mut rows = self.role_permissions.write().await;
        let before = rows.len();
        rows.retain(|row| !row.is_tuple(tenant_id, role_id, resource_id, action));
        Ok(rows.len() != before)
    }

    async fn list_role_permissions(
        &self,
        tenant_id: TenantId,
        role_id: &str,
    ) -> AppResult<Vec<RolePermission>> {
        Ok(self
            .role_permissions
            .read()
            .await
            .iter()
            .filter(|row| row.tenant_id == tenant_id && row.role_id == role_id)
            .cloned()
            .collect())
    }

    async fn list_role_permissions_by_prefix(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        resource_id_prefix: &str,
    ) -> AppResult<Vec<RolePermission>> {
        Ok(self
            .role_permissions
            .read()
            .await
            .iter()
            .filter(|row| {
                row.tenant_id == tenant_id
                    && row.role_id == role_id
                    && row.resource_id.starts_with(resource_id_prefix)
            })
            .cloned()
            .collect())
    }

    async fn list_permissions_by_resource(
        &self,
        tenant_id: TenantId,
        resource_id: &str,
    ) -> AppResult<ResourcePermissions> {
        let user_permissions = self
            .user_permissions
            .read()
            .await
            .iter()
            .filter(|row| row.tenant_id == tenant_id && row.resource_id == resource_id)
            .cloned()
            .collect();
        let role_permissions = self
            .role_permissions
            .read()
            .await
            .iter()
            .filter(|row| row.tenant_id == tenant_id && row.resource_id == resource_id)
            .cloned()
            .collect();

        Ok(ResourcePermissions {
            user_permissions,
            role_permissions,
        })
    }
}
