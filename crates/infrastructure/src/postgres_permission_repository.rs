use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use tessera_application::PermissionRepository;
use tessera_core::{AppError, AppResult, TenantId};
use tessera_domain::{
    PermissionInput, ResourcePermissions, RolePermission, UserPermission, now_millis,
};

mod role_grants;
mod user_grants;


/// PostgreSQL-backed repository for user and role grants.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
}

impl PostgresPermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserPermissionRow {
    tenant_id: uuid::Uuid,
    user_id: String,
    resource_id: String,
    action: String,
    created_at: i64,
}

impl From<UserPermissionRow> for UserPermission {
    fn from(row: UserPermissionRow) -> Self {
        Self {
            tenant_id: TenantId::from_uuid(row.tenant_id),
            user_id: row.user_id,
            resource_id: row.resource_id,
            action: row.action,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct RolePermissionRow {
    tenant_id: uuid::Uuid,
    role_id: String,
    resource_id: String,
    action: String,
    created_at: i64,
}

impl From<RolePermissionRow> for RolePermission {
    fn from(row: RolePermissionRow) -> Self {
        Self {
            tenant_id: TenantId::from_uuid(row.tenant_id),
            role_id: row.role_id,
            resource_id: row.resource_id,
            action: row.action,
            created_at: row.created_at,
        }
    }
}

/// Builds a `LIKE` pattern matching values that literally start with `prefix`.
fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for character in prefix.chars() {
        if matches!(character, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(character);
    }
    pattern.push('%');
    pattern
}

fn storage_error(operation: &str, tenant_id: TenantId, error: sqlx::Error) -> AppError {
    warn!(%tenant_id, operation, error = %error, "permission storage query failed");
    AppError::Storage(format!(
        "failed to {operation} for tenant '{tenant_id}': {error}"
    ))
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    async fn grant_user_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        input: &PermissionInput,
    ) -> AppResult<UserPermission> {
        self.grant_user_permission_impl(tenant_id, user_id, input)
            .await
    }

    async fn revoke_user_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool> {
        self.revoke_user_permission_impl(tenant_id, user_id, resource_id, action)
            .await
    }

    async fn list_user_permissions(
        &self,
        tenant_id: TenantId,
        user_id: &str,
    ) -> AppResult<Vec<UserPermission>> {
        self.list_user_permissions_impl(tenant_id, user_id).await
    }

    async fn list_user_permissions_by_prefix(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id_prefix: &str,
    ) -> AppResult<Vec<UserPermission>> {
        self.list_user_permissions_by_prefix_impl(tenant_id, user_id, resource_id_prefix)
            .await
    }

    async fn grant_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        input: &PermissionInput,
    ) -> AppResult<RolePermission> {
        self.grant_role_permission_impl(tenant_id, role_id, input)
            .await
    }

    async fn revoke_role_permission(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool> {
        self.revoke_role_permission_impl(tenant_id, role_id, resource_id, action)
            .await
    }

    async fn list_role_permissions(
        &self,
        tenant_id: TenantId,
        role_id: &str,
    ) -> AppResult<Vec<RolePermission>> {
        self.list_role_permissions_impl(tenant_id, role_id).await
    }

    async fn list_role_permissions_by_prefix(
        &self,
        tenant_id: TenantId,
        role_id: &str,
        resource_id_prefix: &str,
    ) -> AppResult<Vec<RolePermission>> {
        self.list_role_permissions_by_prefix_impl(tenant_id, role_id, resource_id_prefix)
            .await
    }

    async fn list_permissions_by_resource(
        &self,
        tenant_id: TenantId,
        resource_id: &str,
    ) -> AppResult<ResourcePermissions> {
        let user_permissions = sqlx::query_as::<_, UserPermissionRow>(
            r#"
            SELECT tenant_id, user_id, resource_id, action, created_at
            FROM user_permissions
            WHERE tenant_id = $1
                AND resource_id = $2
            ORDER BY created_at, user_id, action
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| storage_error("list user permissions by resource", tenant_id, error))?;

        let role_permissions = sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT tenant_id, role_id, resource_id, action, created_at
            FROM role_permissions
            WHERE tenant_id = $1
                AND resource_id = $2
            ORDER BY created_at, role_id, action
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| storage_error("list role permissions by resource", tenant_id, error))?;

        Ok(ResourcePermissions {
            user_permissions: user_permissions.into_iter().map(Into::into).collect(),
            role_permissions: role_permissions.into_iter().map(Into::into).collect(),
        })
    }
}
