//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_permission_repository;
mod in_memory_role_membership_repository;
mod postgres_permission_repository;
mod postgres_role_membership_repository;

pub use in_memory_permission_repository::InMemoryPermissionRepository;
pub use in_memory_role_membership_repository::InMemoryRoleMembershipRepository;
pub use postgres_permission_repository::PostgresPermissionRepository;
pub use postgres_role_membership_repository::PostgresRoleMembershipRepository;
