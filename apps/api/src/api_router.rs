use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let tenant_routes = Router::new()
        .route(
            "/api/tenants/{tenant_id}/users/{user_id}/permissions",
            get(handlers::permissions::list_user_permissions_handler)
                .post(handlers::permissions::grant_user_permission_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/users/{user_id}/permissions/revoke",
            post(handlers::permissions::revoke_user_permission_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/users/{user_id}/has-permission",
            get(handlers::effective::has_permission_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/users/{user_id}/effective-permissions",
            get(handlers::effective::effective_permissions_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/users/{user_id}/effective-permissions/by-prefix",
            get(handlers::effective::effective_permissions_by_prefix_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/users/{user_id}/roles",
            get(handlers::roles::list_user_roles_handler)
                .post(handlers::roles::assign_role_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/users/{user_id}/roles/unassign",
            post(handlers::roles::unassign_role_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/roles/{role_id}/permissions",
            get(handlers::permissions::list_role_permissions_handler)
                .post(handlers::permissions::grant_role_permission_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/roles/{role_id}/permissions/revoke",
            post(handlers::permissions::revoke_role_permission_handler),
        )
        .route(
            "/api/tenants/{tenant_id}/resource-permissions",
            get(handlers::resources::resource_permissions_handler),
        );

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(tenant_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
