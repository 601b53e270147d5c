use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use tessera_application::RoleMembershipRepository;
use tessera_core::{AppError, AppResult, TenantId};
use tessera_domain::{UserRole, now_millis};

/// PostgreSQL-backed repository for user to role membership.
#[derive(Clone)]
pub struct PostgresRoleMembershipRepository {
    pool: PgPool,
}

impl PostgresRoleMembershipRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRoleRow {
    tenant_id: uuid::Uuid,
    user_id: String,
    role_id: String,
    created_at: i64,
}

impl From<UserRoleRow> for UserRole {
    fn from(row: UserRoleRow) -> Self {
        Self {
            tenant_id: TenantId::from_uuid(row.tenant_id),
            user_id: row.user_id,
            role_id: row.role_id,
            created_at: row.created_at,
        }
    }
}

fn storage_error(operation: &str, tenant_id: TenantId, error: sqlx::Error) -> AppError {
    warn!(%tenant_id, operation, error = %error, "role membership query failed");
    AppError::Storage(format!(
        "failed to {operation} for tenant '{tenant_id}': {error}"
    ))
}

#[async_trait]
impl RoleMembershipRepository for PostgresRoleMembershipRepository {
    async fn list_role_ids(&self, tenant_id: TenantId, user_id: &str) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT role_id
            FROM user_roles
            WHERE tenant_id = $1
                AND user_id = $2
            ORDER BY created_at, role_id
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| storage_error("list role ids", tenant_id, error))
    }

    async fn assign_role(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        role_id: &str,
    ) -> AppResult<UserRole> {
        let inserted = sqlx::query_as::<_, UserRoleRow>(
            r#"
            INSERT INTO user_roles (tenant_id, user_id, role_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (tenant_id, user_id, role_id) DO NOTHING
            RETURNING tenant_id, user_id, role_id, created_at
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .bind(role_id)
        .bind(now_millis())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| storage_error("assign role", tenant_id, error))?;

        if let Some(row) = inserted {
            return Ok(row.into());
        }

        sqlx::query_as::<_, UserRoleRow>(
            r#"
            SELECT tenant_id, user_id, role_id, created_at
            FROM user_roles
            WHERE tenant_id = $1
                AND user_id = $2
                AND role_id = $3
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| storage_error("load existing role assignment", tenant_id, error))?
        .map(Into::into)
        .ok_or_else(|| {
            AppError::Storage(format!(
                "role assignment '{user_id}:{role_id}' was removed while assigning"
            ))
        })
    }

    async fn unassign_role(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        role_id: &str,
    ) -> AppResult<bool> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM user_roles
            WHERE tenant_id = $1
                AND user_id = $2
                AND role_id = $3
            "#,
        )
        .bind(tenant_id.as_uuid())
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await
        .map_err(|error| storage_error("remove role assignment", tenant_id, error))?
        .rows_affected();

        Ok(rows_affected > 0)
    }
}
