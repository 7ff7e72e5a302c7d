use axum::{extract::State, Json};
use tracing::info;

use crate::error::ApiError;
use crate::types::{AdminCheck, AdminStatus, AuthorizationQuery};

use super::extract::JsonBody;
use super::AppState;

/// POST /check_admin - admin membership by row count
pub async fn check_admin(
    State(state): State<AppState>,
    JsonBody(query): JsonBody<AuthorizationQuery>,
) -> Result<Json<AdminCheck>, ApiError> {
    let admin = state.resolver.check_admin(&query).await?;
    info!("check_admin app={:?} admin={}", query.app_id(), admin);
    Ok(Json(AdminCheck { admin }))
}

/// POST /check_admin_type - admin membership plus the recorded admin type
pub async fn check_admin_type(
    State(state): State<AppState>,
    JsonBody(query): JsonBody<AuthorizationQuery>,
) -> Result<Json<AdminStatus>, ApiError> {
    let status = state.resolver.check_admin_with_type(&query).await?;
    Ok(Json(status))
}
