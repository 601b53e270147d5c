use tessera_domain::EffectivePermissionFilter;

use crate::dto::{
    EffectivePermissionResponse, EffectivePermissionsQuery, HasPermissionQuery,
    HasPermissionResponse, PrefixPermissionsQuery,
};

use super::*;

pub async fn has_permission_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<HasPermissionQuery>,
) -> ApiResult<Json<HasPermissionResponse>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let allowed = state
        .permission_service
        .has_permission(
            tenant_id,
            user_id.as_str(),
            query.resource_id.as_str(),
            query.action.as_str(),
        )
        .await?;

    Ok(Json(HasPermissionResponse { allowed }))
}

pub async fn effective_permissions_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<EffectivePermissionsQuery>,
) -> ApiResult<Json<Vec<EffectivePermissionResponse>>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let filter = EffectivePermissionFilter::new(query.resource_id, query.action);
    let permissions = state
        .permission_service
        .effective_permissions(tenant_id, user_id.as_str(), &filter)
        .await?
        .into_iter()
        .map(EffectivePermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn effective_permissions_by_prefix_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<PrefixPermissionsQuery>,
) -> ApiResult<Json<Vec<EffectivePermissionResponse>>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let permissions = state
        .permission_service
        .effective_permissions_by_prefix(
            tenant_id,
            user_id.as_str(),
            query.prefix.as_str(),
            query.action.as_deref(),
        )
        .await?
        .into_iter()
        .map(EffectivePermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}
