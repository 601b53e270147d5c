use crate::dto::{PermissionGrantResponse, ResourcePermissionsQuery};

use super::*;

pub async fn resource_permissions_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    ApiQuery(query): ApiQuery<ResourcePermissionsQuery>,
) -> ApiResult<Json<Vec<PermissionGrantResponse>>> {
    let tenant_id = parse_tenant_id(tenant_id.as_str())?;
    let grants = state
        .permission_service
        .permissions_by_resource(tenant_id, query.resource_id.as_str())
        .await?
        .into_grants()
        .into_iter()
        .map(PermissionGrantResponse::from)
        .collect();

    Ok(Json(grants))
}
