use super::*;

impl PostgresPermissionRepository {
    pub(super) async fn grant_user_permission_impl(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        input: &PermissionInput,
    ) -> AppResult<UserPermission> {
        let inserted = sqlx::query_as::<_, UserPermissionRow>(
            r#"
            INSERT INTO user_permissions (tenant_id, user_id, resource_id, action, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (tenant_id, user_id, resource_id, action) DO NOTHING
            RETURNING tenant_id, user_id, resource_id, action, created_at
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .bind(input.resource_id())
        .bind(input.action())
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| storage_error("grant user permission", tenant_id, error))?;

        if let Some(row) = inserted {
            return Ok(row.into());
        }

        // The tuple already existed; return the stored row unchanged.
        sqlx::query_as::<_, UserPermissionRow>(
            r#"
            SELECT tenant_id, user_id, resource_id, action, created_at
            FROM user_permissions
            WHERE tenant_id = $1
                AND user_id = $2
                AND resource_id = $3
                AND action = $4
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .bind(input.resource_id())
        .bind(input.action())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| storage_error("load existing user permission", tenant_id, error))?
        .map(Into::into)
        .ok_or_else(|| {
            AppError::Storage(format!(
                "user permission '{}:{}' for user '{user_id}' was removed while granting",
                input.resource_id(),
                input.action()
            ))
        })
    }

    pub(super) async fn revoke_user_permission_impl(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM user_permissions
            WHERE tenant_id = $1
                AND user_id = $2
                AND resource_id = $3
                AND action = $4
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .bind(resource_id)
        .bind(action)
        .execute(&self.pool)
        .await
        .map_err(|error| storage_error("revoke user permission", tenant_id, error))?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    pub(super) async fn list_user_permissions_impl(
        &self,
        tenant_id: TenantId,
        user_id: &str,
    ) -> AppResult<Vec<UserPermission>> {
        let rows = sqlx::query_as::<_, UserPermissionRow>(
            r#"
            SELECT tenant_id, user_id, resource_id, action, created_at
            FROM user_permissions
            WHERE tenant_id = $1
                AND user_id = $2
            ORDER BY created_at, resource_id, action
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| storage_error("list user permissions", tenant_id, error))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub(super) async fn list_user_permissions_by_prefix_impl(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id_prefix: &str,
    ) -> AppResult<Vec<UserPermission>> {
        let rows = sqlx::query_as::<_, UserPermissionRow>(
            r#"
            SELECT tenant_id, user_id, resource_id, action, created_at
            FROM user_permissions
            WHERE tenant_id = $1
                AND user_id = $2
                AND resource_id LIKE $3 ESCAPE '\'
            ORDER BY created_at, resource_id, action
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .bind(like_prefix_pattern(resource_id_prefix))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| storage_error("list user permissions by prefix", tenant_id, error))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
