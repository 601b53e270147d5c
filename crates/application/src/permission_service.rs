use std::sync::Arc;

use tessera_core::{AppError, AppResult, NonEmptyString, TenantId};

use crate::{PermissionRepository, RoleMembershipRepository};

mod evaluation;
mod grants;


/// Application service for tenant-scoped grants and permission evaluation.
///
/// Evaluation is a pure computation over repository reads. User grants are
/// consulted before role grants, and roles are visited in the order the
/// membership repository returns them.
#[derive(Clone)]
pub struct PermissionService {
    permission_repository: Arc<dyn PermissionRepository>,
    role_membership_repository: Arc<dyn RoleMembershipRepository>,
}

impl PermissionService {
    /// Creates a new permission service from repository implementations.
    #[must_use]
    pub fn new(
        permission_repository: Arc<dyn PermissionRepository>,
        role_membership_repository: Arc<dyn RoleMembershipRepository>,
    ) -> Self {
        Self {
            permission_repository,
            role_membership_repository,
        }
    }
}

fn require_subject_id(kind: &str, value: &str) -> AppResult<()> {
    NonEmptyString::new(value)
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("{kind} id must not be empty")))
}
