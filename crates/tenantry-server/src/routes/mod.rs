//! HTTP route handlers.
//!
//! ```text
//! GET    /health               - Liveness
//! GET    /health/ready         - Readiness (database reachable)
//!
//! POST   /organizations        - Register organization + admin
//! GET    /organizations/{id}   - Organization details
//! PATCH  /organizations/{id}   - Rename (admin token for {id})
//! DELETE /organizations/{id}   - Soft delete (admin token for {id})
//!
//! POST   /auth/login           - Admin login, returns access token
//! ```

pub mod auth;
pub mod health;
pub mod organizations;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/organizations", organization_routes())
        .route("/auth/login", post(auth::login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the organization routes router.
pub fn organization_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(organizations::create))
        .route(
            "/{id}",
            get(organizations::show)
                .patch(organizations::update)
                .delete(organizations::delete),
        )
}
