// HTTP surface. Every lookup endpoint is a POST taking a JSON body; the
// handlers only parse, delegate to the resolver and render.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::AuthorizationResolver;

pub mod admin;
pub mod authorization;
pub mod extract;
pub mod public;
pub mod security_level;

pub use admin::{check_admin, check_admin_type};
pub use authorization::get_authorization;
pub use security_level::{get_app_security_level, get_employee_security_level};

/// Shared per-router state. Cloned into every request; holds no mutable data.
#[derive(Clone)]
pub struct AppState {
    pub resolver: AuthorizationResolver,
}

impl AppState {
    pub fn new(resolver: AuthorizationResolver) -> Self {
        Self { resolver }
    }
}

/// Full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Lookups
        .merge(lookup_routes())
        .with_state(state)
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/check_admin", post(check_admin))
        .route("/check_admin_type", post(check_admin_type))
        .route("/get_app_security_level", post(get_app_security_level))
        .route("/get_employee_security_level", post(get_employee_security_level))
        .route("/get_authorization", post(get_authorization))
}
