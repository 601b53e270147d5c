use std::sync::Arc;

use sqlx::PgPool;
use tessera_application::{PermissionService, RoleMembershipService};
use tessera_infrastructure::{
    InMemoryPermissionRepository, InMemoryRoleMembershipRepository, PostgresPermissionRepository,
    PostgresRoleMembershipRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub permission_service: PermissionService,
    pub role_membership_service: RoleMembershipService,
    pub postgres_pool: Option<PgPool>,
}

impl AppState {
    /// Wires services to PostgreSQL adapters sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        let role_membership_repository =
            Arc::new(PostgresRoleMembershipRepository::new(pool.clone()));

        Self {
            permission_service: PermissionService::new(
                Arc::new(PostgresPermissionRepository::new(pool.clone())),
                role_membership_repository.clone(),
            ),
            role_membership_service: RoleMembershipService::new(role_membership_repository),
            postgres_pool: Some(pool),
        }
    }

    /// Wires services to process-local adapters.
    pub fn in_memory() -> Self {
        let role_membership_repository = Arc::new(InMemoryRoleMembershipRepository::new());

        Self {
            permission_service: PermissionService::new(
                Arc::new(InMemoryPermissionRepository::new()),
                role_membership_repository.clone(),
            ),
            role_membership_service: RoleMembershipService::new(role_membership_repository),
            postgres_pool: None,
        }
    }
}
