use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tessera_core::TenantId;
use tower::ServiceExt;

use crate::api_router::build_router;
use crate::state::AppState;

fn router() -> Router {
    build_router(AppState::in_memory())
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|_| unreachable!());
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_else(|_| unreachable!());
    send(router, request).await
}

async fn post(router: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap_or_else(|_| unreachable!());
    send(router, request).await
}

#[tokio::test]
async fn health_reports_memory_backend_as_ready() {
    let (status, body) = get(&router(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["postgres"]["status"], "disabled");
}

#[tokio::test]
async fn role_grant_is_visible_through_has_permission() {
    let router = router();
    let base = format!("/api/tenants/{}", TenantId::new());

    let (status, _) = post(
        &router,
        &format!("{base}/roles/r1/permissions"),
        json!({ "resource_id": "/api/*", "action": "read" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post(
        &router,
        &format!("{base}/users/u1/roles"),
        json!({ "role_id": "r1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = get(
        &router,
        &format!("{base}/users/u1/has-permission?resource_id=/api/users&action=read"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["allowed"], true);

    let (_, body) = get(
        &router,
        &format!("{base}/users/u1/has-permission?resource_id=/api/users&action=write"),
    )
    .await;
    assert_eq!(body["allowed"], false);
}

#[tokio::test]
async fn effective_permissions_list_direct_then_role_entries() {
    let router = router();
    let base = format!("/api/tenants/{}", TenantId::new());

    post(
        &router,
        &format!("{base}/users/u1/permissions"),
        json!({ "resource_id": "/docs/*", "action": "read" }),
    )
    .await;
    post(
        &router,
        &format!("{base}/roles/r1/permissions"),
        json!({ "resource_id": "/docs/*", "action": "read" }),
    )
    .await;
    post(&router, &format!("{base}/users/u1/roles"), json!({ "role_id": "r1" })).await;

    let (status, body) = get(
        &router,
        &format!("{base}/users/u1/effective-permissions?resource_id=/docs/a"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().cloned().unwrap_or_default();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["source"], "user");
    assert_eq!(entries[1]["source"], "role");
    assert_eq!(entries[1]["source_id"], "r1");
}

#[tokio::test]
async fn prefix_listing_scans_stored_strings() {
    let router = router();
    let base = format!("/api/tenants/{}", TenantId::new());

    for resource_id in ["/api/*", "/api/v1/users"] {
        post(
            &router,
            &format!("{base}/users/u1/permissions"),
            json!({ "resource_id": resource_id, "action": "read" }),
        )
        .await;
    }

    let (status, body) = get(
        &router,
        &format!("{base}/users/u1/effective-permissions/by-prefix?prefix=/api/v1/"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().cloned().unwrap_or_default();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["resource_id"], "/api/v1/users");
}

#[tokio::test]
async fn revoke_reports_removed_rows() {
    let router = router();
    let base = format!("/api/tenants/{}", TenantId::new());
    let grant = json!({ "resource_id": "/x", "action": "read" });

    post(&router, &format!("{base}/users/u1/permissions"), grant.clone()).await;

    let (status, body) = post(
        &router,
        &format!("{base}/users/u1/permissions/revoke"),
        grant.clone(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revoked"], true);

    let (_, body) = post(&router, &format!("{base}/users/u1/permissions/revoke"), grant).await;
    assert_eq!(body["revoked"], false);
}

#[tokio::test]
async fn resource_permissions_return_exact_grants_of_both_kinds() {
    let router = router();
    let base = format!("/api/tenants/{}", TenantId::new());

    post(
        &router,
        &format!("{base}/users/u1/permissions"),
        json!({ "resource_id": "/files/report", "action": "read" }),
    )
    .await;
    post(
        &router,
        &format!("{base}/roles/r1/permissions"),
        json!({ "resource_id": "/files/report", "action": "*" }),
    )
    .await;
    post(
        &router,
        &format!("{base}/roles/r1/permissions"),
        json!({ "resource_id": "/files/*", "action": "*" }),
    )
    .await;

    let (status, body) = get(
        &router,
        &format!("{base}/resource-permissions?resource_id=/files/report"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let grants = body.as_array().cloned().unwrap_or_default();
    assert_eq!(grants.len(), 2);
    assert_eq!(grants[0]["source"], "user");
    assert_eq!(grants[0]["subject_id"], "u1");
    assert_eq!(grants[1]["source"], "role");
    assert_eq!(grants[1]["subject_id"], "r1");
}

#[tokio::test]
async fn blank_grant_fields_are_rejected() {
    let router = router();
    let base = format!("/api/tenants/{}", TenantId::new());

    let (status, body) = post(
        &router,
        &format!("{base}/users/u1/permissions"),
        json!({ "resource_id": " ", "action": "read" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_tenant_id_is_a_bad_request() {
    let (status, body) = get(&router(), "/api/tenants/not-a-uuid/users/u1/permissions").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("tenant id")
    );
}

#[tokio::test]
async fn role_membership_round_trip() {
    let router = router();
    let base = format!("/api/tenants/{}", TenantId::new());

    post(&router, &format!("{base}/users/u1/roles"), json!({ "role_id": "r1" })).await;
    post(&router, &format!("{base}/users/u1/roles"), json!({ "role_id": "r1" })).await;
    post(&router, &format!("{base}/users/u1/roles"), json!({ "role_id": "r2" })).await;

    let (_, body) = get(&router, &format!("{base}/users/u1/roles")).await;
    assert_eq!(body, json!(["r1", "r2"]));

    let (_, body) = post(
        &router,
        &format!("{base}/users/u1/roles/unassign"),
        json!({ "role_id": "r1" }),
    )
    .await;
    assert_eq!(body["removed"], true);

    let (_, body) = get(&router, &format!("{base}/users/u1/roles")).await;
    assert_eq!(body, json!(["r2"]));
}

#[tokio::test]
async fn missing_query_parameter_uses_error_envelope() {
    let base = format!("/api/tenants/{}", TenantId::new());
    let (status, body) = get(
        &router(),
        &format!("{base}/users/u1/has-permission?resource_id=/x"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("invalid query parameters")
    );
}

#[tokio::test]
async fn malformed_json_body_uses_error_envelope() {
    let base = format!("/api/tenants/{}", TenantId::new());
    let request = Request::builder()
        .method("POST")
        .uri(format!("{base}/users/u1/permissions"))
        .header("content-type", "application/json")
        .body(Body::from("{\"resource_id\": "))
        .unwrap_or_else(|_| unreachable!());
    let (status, body) = send(&router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("invalid request body")
    );
}
