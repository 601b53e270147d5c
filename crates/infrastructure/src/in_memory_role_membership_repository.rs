use async_trait::async_trait;
use tokio::sync::RwLock;

use tessera_application::RoleMembershipRepository;
use tessera_core::{AppResult, TenantId};
use tessera_domain::UserRole;

/// In-memory role membership repository implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleMembershipRepository {
    memberships: RwLock<Vec<UserRole>>,
}

impl InMemoryRoleMembershipRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn is_membership(row: &UserRole, tenant_id: TenantId, user_id: &str, role_id: &str) -> bool {
    row.tenant_id == tenant_id && row.user_id == user_id && row.role_id == role_id
}

#[async_trait]
impl RoleMembershipRepository for InMemoryRoleMembershipRepository {
    async fn list_role_ids(&self, tenant_id: TenantId, user_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .memberships
            .read()
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
        let mut memberships = self.memberships.write().await;
        if let Some(existing) = memberships
            .iter()
            .find(|row| is_membership(row, tenant_id, user_id, role_id))
        {
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
        let mut memberships = self.memberships.write().await;
        let before = memberships.len();
        memberships.retain(|row| !is_membership(row, tenant_id, user_id, role_id));
        Ok(memberships.len() != before)
    }
}
