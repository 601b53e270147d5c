use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use tessera_core::TenantId;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

pub mod effective;
pub mod health;
pub mod permissions;
pub mod resources;
pub mod roles;

fn parse_tenant_id(value: &str) -> ApiResult<TenantId> {
    Ok(value.parse::<TenantId>()?)
}

#[cfg(test)]
mod tests;
