use crate::dto::{AssignRoleRequest, UnassignRoleRequest, UnassignRoleResponse, UserRoleResponse};

use super::*;

pub async fn list_user_roles_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
) -> ApiResult<Json<Vec<String>>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let role_ids = state
        .role_membership_service
        .role_ids(tenant_id, user_id.as_str())
        .await?;

    Ok(Json(role_ids))
}

pub async fn assign_role_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<AssignRoleRequest>,
) -> ApiResult<(StatusCode, Json<UserRoleResponse>)> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let membership = state
        .role_membership_service
        .assign_role(tenant_id, user_id.as_str(), payload.role_id.as_str())
        .await?;

    Ok((StatusCode::CREATED, Json(membership.into())))
}

pub async fn unassign_role_handler(
    State(state): State<AppState>,
    Path((tenant_id, user_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<UnassignRoleRequest>,
) -> ApiResult<Json<UnassignRoleResponse>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let removed = state
        .role_membership_service
        .unassign_role(tenant_id, user_id.as_str(), payload.role_id.as_str())
        .await?;

    Ok(Json(UnassignRoleResponse { removed }))
}
