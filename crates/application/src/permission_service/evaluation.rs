use tessera_domain::{
    EffectivePermission, EffectivePermissionFilter, RolePermission, UserPermission, grant_applies,
};
use tracing::debug;

use super::*;

impl PermissionService {
    /// Returns whether a user holds an action on a resource, directly or
    /// through any of its roles.
    ///
    /// Stops reading at the first matching grant: direct grants are checked
    /// before the role set is loaded, and remaining roles are skipped once a
    /// role grant matches.
    pub async fn has_permission(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id: &str,
        action: &str,
    ) -> AppResult<bool> {
        let user_permissions = self
            .permission_repository
            .list_user_permissions(tenant_id, user_id)
            .await?;

        if let Some(grant) = user_permissions
            .iter()
            .find(|grant| grant_applies(&grant.resource_id, &grant.action, resource_id, action))
        {
            debug!(
                %tenant_id,
                user_id,
                resource_id,
                action,
                granted_resource = %grant.resource_id,
                "permission granted by direct grant"
            );
            return Ok(true);
        }

        let role_ids = self
            .role_membership_repository
            .list_role_ids(tenant_id, user_id)
            .await?;

        for role_id in &role_ids {
            let role_permissions = self
                .permission_repository
                .list_role_permissions(tenant_id, role_id)
                .await?;

            if let Some(grant) = role_permissions.iter().find(|grant| {
                grant_applies(&grant.resource_id, &grant.action, resource_id, action)
            }) {
                debug!(
                    %tenant_id,
                    user_id,
                    resource_id,
                    action,
                    role_id = %role_id,
                    granted_resource = %grant.resource_id,
                    "permission granted by role grant"
                );
                return Ok(true);
            }
        }

        debug!(
            %tenant_id,
            user_id,
            resource_id,
            action,
            role_count = role_ids.len(),
            "permission denied"
        );
        Ok(false)
    }

    /// Lists every grant visible to a user, tagged with its source.
    ///
    /// Direct grants come first, followed by role grants in role order. Grants
    /// are not deduplicated across sources.
    pub async fn effective_permissions(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        filter: &EffectivePermissionFilter,
    ) -> AppResult<Vec<EffectivePermission>> {
        let user_permissions = self
            .permission_repository
            .list_user_permissions(tenant_id, user_id)
            .await?;

        let role_ids = self
            .role_membership_repository
            .list_role_ids(tenant_id, user_id)
            .await?;

        let mut role_permissions = Vec::with_capacity(role_ids.len());
        for role_id in &role_ids {
            role_permissions.push(
                self.permission_repository
                    .list_role_permissions(tenant_id, role_id)
                    .await?,
            );
        }

        Ok(combine_effective_permissions(
            user_permissions,
            role_permissions,
            filter,
        ))
    }

    /// Lists grants visible to a user whose stored resource id literally
    /// starts with `resource_id_prefix`.
    ///
    /// This is a plain string prefix scan over stored patterns. A grant stored
    /// as `/api/*` is not returned for the prefix `/api/v1/`, even though it
    /// would match every resource under that prefix.
    pub async fn effective_permissions_by_prefix(
        &self,
        tenant_id: TenantId,
        user_id: &str,
        resource_id_prefix: &str,
        action: Option<&str>,
    ) -> AppResult<Vec<EffectivePermission>> {
        let user_permissions = self
            .permission_repository
            .list_user_permissions_by_prefix(tenant_id, user_id, resource_id_prefix)
            .await?;

        let role_ids = self
            .role_membership_repository
            .list_role_ids(tenant_id, user_id)
            .await?;

        let mut role_permissions = Vec::with_capacity(role_ids.len());
        for role_id in &role_ids {
            role_permissions.push(
                self.permission_repository
                    .list_role_permissions_by_prefix(tenant_id, role_id, resource_id_prefix)
                    .await?,
            );
        }

        let filter = EffectivePermissionFilter::action_only(action.map(str::to_owned));
        Ok(combine_effective_permissions(
            user_permissions,
            role_permissions,
            &filter,
        ))
    }
}

fn combine_effective_permissions(
    user_permissions: Vec<UserPermission>,
    role_permissions: Vec<Vec<RolePermission>>,
    filter: &EffectivePermissionFilter,
) -> Vec<EffectivePermission> {
    let direct = user_permissions
        .into_iter()
        .filter(|grant| filter.admits(&grant.resource_id, &grant.action))
        .map(EffectivePermission::from);

    let inherited = role_permissions
        .into_iter()
        .flatten()
        .filter(|grant| filter.admits(&grant.resource_id, &grant.action))
        .map(EffectivePermission::from);

    direct.chain(inherited).collect()
}
