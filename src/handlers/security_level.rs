use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::types::{AppSecurityLevel, AuthorizationQuery, EmployeeSecurityLevel};

use super::extract::JsonBody;
use super::AppState;

/// POST /get_app_security_level
pub async fn get_app_security_level(
    State(state): State<AppState>,
    JsonBody(query): JsonBody<AuthorizationQuery>,
) -> Result<Json<AppSecurityLevel>, ApiError> {
    let level = state.resolver.get_app_security_level(&query).await?;
    Ok(Json(AppSecurityLevel { level }))
}

/// POST /get_employee_security_level
pub async fn get_employee_security_level(
    State(state): State<AppState>,
    JsonBody(query): JsonBody<AuthorizationQuery>,
) -> Result<Json<EmployeeSecurityLevel>, ApiError> {
    let level = state.resolver.get_employee_security_level(&query).await?;
    Ok(Json(EmployeeSecurityLevel { level }))
}
