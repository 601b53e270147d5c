//! Application services and ports.

#![forbid(unsafe_code)]

mod permission_ports;
mod permission_service;
mod role_membership_service;

pub use permission_ports::{PermissionRepository, RoleMembershipRepository};
pub use permission_service::PermissionService;
pub use role_membership_service::RoleMembershipService;
