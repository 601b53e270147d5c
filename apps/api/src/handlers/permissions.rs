use tessera_domain::PermissionInput;

use crate::dto::{
    GrantPermissionRequest, RevokePermissionRequest, RevokePermissionResponse,
    RolePermissionResponse, UserPermissionResponse,
};

use super::*;

pub async fn list_user_permissions_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<UserPermissionResponse>>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let permissions = state
        .permission_service
        .user_permissions(tenant_id, user_id.as_str())
        .await?
        .into_iter()
        .map(UserPermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn grant_user_permission_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<GrantPermissionRequest>,
) -> ApiResult<(StatusCode, Json<UserPermissionResponse>)> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let input = PermissionInput::new(payload.resource_id, payload.action)?;
    let permission = state
        .permission_service
        .grant_user_permission(tenant_id, user_id.as_str(), input)
        .await?;

    Ok((StatusCode::CREATED, Json(permission.into())))
}

pub async fn revoke_user_permission_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<RevokePermissionRequest>,
) -> ApiResult<Json<RevokePermissionResponse>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let revoked = state
        .permission_service
        .revoke_user_permission(
            tenant_id,
            user_id.as_str(),
            payload.resource_id.as_str(),
            payload.action.as_str(),
        )
        .await?;

    Ok(Json(RevokePermissionResponse { revoked }))
}

pub async fn list_role_permissions_handler(
    State(state): State<AppState>,
    Path((tenant_id, role_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<RolePermissionResponse>>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let permissions = state
        .permission_service
        .role_permissions(tenant_id, role_id.as_str())
        .await?
        .into_iter()
        .map(RolePermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn grant_role_permission_handler(
    State(state): State<AppState>,
    Path((tenant_id, role_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<GrantPermissionRequest>,
) -> ApiResult<(StatusCode, Json<RolePermissionResponse>)> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let input = PermissionInput::new(payload.resource_id, payload.action)?;
    let permission = state
        .permission_service
        .grant_role_permission(tenant_id, role_id.as_str(), input)
        .await?;

    Ok((StatusCode::CREATED, Json(permission.into())))
}

pub async fn revoke_role_permission_handler(
    State(state): State<AppState>,
    Path((tenant_id, role_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<RevokePermissionRequest>,
) -> ApiResult<Json<RevokePermissionResponse>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let revoked = state
        .permission_service
        .revoke_role_permission(
            tenant_id,
            role_id.as_str(),
            payload.resource_id.as_str(),
            payload.action.as_str(),
        )
        .await?;

    Ok(Json(RevokePermissionResponse { revoked }))
}
