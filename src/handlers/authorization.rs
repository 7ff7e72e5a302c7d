use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::types::{AuthorizationQuery, AuthorizationResult};

use super::extract::JsonBody;
use super::AppState;

/// POST /get_authorization - every lookup the payload allows, in one response.
///
/// Keys that were not requested are omitted; requested keys with no matching
/// row come back as `null`.
pub async fn get_authorization(
    State(state): State<AppState>,
    JsonBody(query): JsonBody<AuthorizationQuery>,
) -> Result<Json<AuthorizationResult>, ApiError> {
    let result = state.resolver.get_authorization(&query).await?;
    Ok(Json(result))
}
