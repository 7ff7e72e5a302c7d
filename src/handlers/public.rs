use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use super::AppState;

/// GET / - service name, version and endpoint list
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Authorization Lookup API",
        "version": version,
        "endpoints": {
            "check_admin": "POST /check_admin {ADMIN_EMAIL, APP_ID}",
            "check_admin_type": "POST /check_admin_type {ADMIN_EMAIL, APP_ID}",
            "get_app_security_level": "POST /get_app_security_level {APP_ID}",
            "get_employee_security_level": "POST /get_employee_security_level {EMPLOYEE_CODE}",
            "get_authorization": "POST /get_authorization {ADMIN_EMAIL?, APP_ID?, EMPLOYEE_CODE?}",
            "health": "GET /health",
        }
    }))
}

/// GET /health - 200 when both databases answer, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let (app_support, employee) = state.resolver.ping().await;

    let describe = |result: &Result<(), crate::database::DatabaseError>| match result {
        Ok(()) => "ok".to_string(),
        Err(e) => e.to_string(),
    };

    let status = if app_support.is_ok() && employee.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let label = if status == StatusCode::OK { "ok" } else { "degraded" };

    (
        status,
        Json(json!({
            "status": label,
            "timestamp": now,
            "databases": {
                "app_support": describe(&app_support),
                "employee": describe(&employee),
            }
        })),
    )
}
