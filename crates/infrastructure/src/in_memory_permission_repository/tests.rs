use std::sync::Arc;

use tessera_application::PermissionRepository;
use tessera_core::TenantId;
use tessera_domain::PermissionInput;

use super::InMemoryPermissionRepository;

fn input(resource_id: &str, action: &str) -> PermissionInput {
    PermissionInput::new(resource_id, action).unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn regrant_returns_the_stored_row() {
    let repository = InMemoryPermissionRepository::new();
    let tenant_id = TenantId::new();

    let first = repository
        .grant_user_permission(tenant_id, "u1", &input("/x", "read"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let second = repository
        .grant_user_permission(tenant_id, "u1", &input("/x", "read"))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(first, second);
    let listed = repository.list_user_permissions(tenant_id, "u1").await;
    assert_eq!(listed.unwrap_or_default().len(), 1);
}

#[tokio::test]
async fn concurrent_role_grants_converge_to_one_row() {
    let repository = Arc::new(InMemoryPermissionRepository::new());
    let tenant_id = TenantId::new();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let repository = Arc::clone(&repository);
        handles.push(tokio::spawn(async move {
            repository
                .grant_role_permission(tenant_id, "r1", &input("/api/*", "write"))
                .await
        }));
    }
    for handle in handles {
        let result = handle.await;
        assert!(matches!(result, Ok(Ok(_))));
    }

    let listed = repository.list_role_permissions(tenant_id, "r1").await;
    assert_eq!(listed.unwrap_or_default().len(), 1);
}

#[tokio::test]
async fn concurrent_user_grants_converge_to_one_row() {
    let repository = InMemoryPermissionRepository::new();
    let tenant_id = TenantId::new();
    let grant = input("/x", "read");

    let (first, second) = tokio::join!(
        repository.grant_user_permission(tenant_id, "u1", &grant),
        repository.grant_user_permission(tenant_id, "u1", &grant),
    );

    assert!(first.is_ok());
    assert_eq!(first.ok(), second.ok());
    let listed = repository.list_user_permissions(tenant_id, "u1").await;
    assert_eq!(listed.unwrap_or_default().len(), 1);
}

#[tokio::test]
async fn revoke_reports_whether_a_row_was_removed() {
    let repository = InMemoryPermissionRepository::new();
    let tenant_id = TenantId::new();

    assert!(
        repository
            .grant_role_permission(tenant_id, "r1", &input("/x", "read"))
            .await
            .is_ok()
    );

    let first = repository
        .revoke_role_permission(tenant_id, "r1", "/x", "read")
        .await;
    assert!(matches!(first, Ok(true)));
    let second = repository
        .revoke_role_permission(tenant_id, "r1", "/x", "read")
        .await;
    assert!(matches!(second, Ok(false)));
}

#[tokio::test]
async fn prefix_scan_compares_stored_strings_literally() {
    let repository = InMemoryPermissionRepository::new();
    let tenant_id = TenantId::new();

    for resource_id in ["/api/v1/users", "/api/*", "/API/v1/admin"] {
        assert!(
            repository
                .grant_user_permission(tenant_id, "u1", &input(resource_id, "read"))
                .await
                .is_ok()
        );
    }

    let listed = repository
        .list_user_permissions_by_prefix(tenant_id, "u1", "/api/v1/")
        .await
        .unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].resource_id, "/api/v1/users");
}

#[tokio::test]
async fn resource_lookup_ignores_patterns_and_other_tenants() {
    let repository = InMemoryPermissionRepository::new();
    let tenant_id = TenantId::new();
    let other_tenant = TenantId::new();

    for (tenant, resource_id) in [
        (tenant_id, "/files/report"),
        (tenant_id, "/files/*"),
        (other_tenant, "/files/report"),
    ] {
        assert!(
            repository
                .grant_user_permission(tenant, "u1", &input(resource_id, "read"))
                .await
                .is_ok()
        );
    }
    assert!(
        repository
            .grant_role_permission(tenant_id, "r1", &input("/files/report", "*"))
            .await
            .is_ok()
    );

    let permissions = repository
        .list_permissions_by_resource(tenant_id, "/files/report")
        .await
        .unwrap_or_default();
    assert_eq!(permissions.user_permissions.len(), 1);
    assert_eq!(permissions.user_permissions[0].tenant_id, tenant_id);
    assert_eq!(permissions.role_permissions.len(), 1);
}

#[tokio::test]
async fn listings_keep_insertion_order() {
    let repository = InMemoryPermissionRepository::new();
    let tenant_id = TenantId::new();

    for resource_id in ["/c", "/a", "/b"] {
        assert!(
            repository
                .grant_user_permission(tenant_id, "u1", &input(resource_id, "read"))
                .await
                .is_ok()
        );
    }

    let resource_ids: Vec<_> = repository
        .list_user_permissions(tenant_id, "u1")
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|row| row.resource_id)
        .collect();
    assert_eq!(resource_ids, vec!["/c", "/a", "/b"]);
}
