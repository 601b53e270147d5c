use std::sync::Arc;

use tessera_core::{AppError, AppResult, NonEmptyString, TenantId};
use tessera_domain::UserRole;
use tracing::info;

use crate::RoleMembershipRepository;

/// Application service for tenant-scoped role membership.
#[derive(Clone)]
pub struct RoleMembershipService {
    repository: Arc<dyn RoleMembershipRepository>,
}

impl RoleMembershipService {
    /// Creates a new membership service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleMembershipRepository>) -> Self {
        Self { repository }
    }

    /// Adds a user to a role. Assigning an existing membership is a no-op.
    pub async fn assign_role(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        role_id: &str,
    ) -> AppResult<UserRole> {
        let user_id = validated_id("user", user_id)?;
        let role_id = validated_id("role", role_id)?;

        let membership = self
            .repository
            .assign_role(tenant_id, user_id.as_str(), role_id.as_str())
            .await?;

        info!(
            %tenant_id,
            user_id = user_id.as_str(),
            role_id = role_id.as_str(),
            "role assigned"
        );

        Ok(membership)
    }

    /// Removes a user from a role and returns whether the membership existed.
    pub async fn unassign_role(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        role_id: &str,
    ) -> AppResult<bool> {
        let removed = self
            .repository
            .unassign_role(tenant_id, user_id, role_id)
            .await?;

        info!(%tenant_id, user_id, role_id, removed, "role unassign processed");

        Ok(removed)
    }

    /// Lists the role ids of a user in storage order.
    pub async fn role_ids(&self, tenant_id: TenantId, user_id: &str) -> AppResult<Vec<String>> {
        self.repository.list_role_ids(tenant_id, user_id).await
    }
}

fn validated_id(kind: &str, value: &str) -> AppResult<NonEmptyString> {
    NonEmptyString::new(value)
        .map_err(|_| AppError::Validation(format!("{kind} id must not be empty")))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tessera_core::{AppError, AppResult, TenantId};
    use tessera_domain::UserRole;
    use tokio::sync::Mutex;

    use crate::RoleMembershipRepository;

    use super::RoleMembershipService;

    #[derive(Default)]
    struct FakeRoleMembershipRepository {
        memberships: Mutex<Vec<UserRole>>,
    }

    #[async_trait]
    impl RoleMembershipRepository for FakeRoleMembershipRepository {
        async fn list_role_ids(
            &self,
            tenant_id: TenantId,
            user_id: &str,
        ) -> AppResult<Vec<String>> {
            Ok(self
                .memberships
                .lock()
                .await
                .iter()
                .filter(|row| row.tenant_id == tenant_id && row.user_id == user_id)
                .map(|row| row.role_id.clone())
                .collect())
        }

        async fn assign_role(
            &self,
            tenant_id: TenantId,
            user_id: &str,
            role_id: &str,
        ) -> AppResult<UserRole> {
            let mut memberships = self.memberships.lock().await;
            if let Some(existing) = memberships.iter().find(|row| {
                row.tenant_id == tenant_id && row.user_id == user_id && row.role_id == role_id
            }) {
                return Ok(existing.clone());
            }

            let membership = UserRole::new(tenant_id, user_id, role_id);
            memberships.push(membership.clone());
            Ok(membership)
        }

        async fn unassign_role(
            &self,
            tenant_id: TenantId,
            user_id: &str,
            role_id: &str,
        ) -> AppResult<bool> {
            let mut memberships = self.memberships.lock().await;
            let before = memberships.len();
            memberships.retain(|row| {
                !(row.tenant_id == tenant_id && row.user_id == user_id && row.role_id == role_id)
            });
            Ok(memberships.len() != before)
        }
    }

    #[tokio::test]
    async fn assign_is_idempotent_and_unassign_reports_missing_rows() {
        let service = RoleMembershipService::new(Arc::new(FakeRoleMembershipRepository::default()));
        let tenant_id = TenantId::new();

        assert!(service.assign_role(tenant_id, "u1", "r1").await.is_ok());
        assert!(service.assign_role(tenant_id, "u1", "r1").await.is_ok());
        assert!(service.assign_role(tenant_id, "u1", "r2").await.is_ok());

        let role_ids = service.role_ids(tenant_id, "u1").await.unwrap_or_default();
        assert_eq!(role_ids, vec!["r1".to_owned(), "r2".to_owned()]);

        assert!(matches!(
            service.unassign_role(tenant_id, "u1", "r1").await,
            Ok(true)
        ));
        assert!(matches!(
            service.unassign_role(tenant_id, "u1", "r1").await,
            Ok(false)
        ));
    }

    #[tokio::test]
    async fn assign_rejects_blank_ids() {
        let service = RoleMembershipService::new(Arc::new(FakeRoleMembershipRepository::default()));

        let result = service.assign_role(TenantId::new(), "u1", " ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
