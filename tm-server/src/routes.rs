use crate::state::AppState;
use crate::{api, health};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Auth endpoints
        .route("/api/v1/auth/register", post(api::auth::auth::register))
        .route("/api/v1/auth/login", post(api::auth::auth::login))
        .route("/api/v1/auth/refresh", post(api::auth::auth::refresh))
        .route("/api/v1/auth/logout", post(api::auth::auth::logout))
        // Task endpoints (bearer-protected via the AuthUser extractor)
        .route(
            "/api/v1/tasks",
            get(api::tasks::tasks::list_tasks).post(api::tasks::tasks::create_task),
        )
        .route(
            "/api/v1/tasks/{id}",
            get(api::tasks::tasks::get_task)
                .put(api::tasks::tasks::update_task)
                .delete(api::tasks::tasks::delete_task),
        )
        .route(
            "/api/v1/tasks/{id}/complete",
            post(api::tasks::tasks::complete_task),
        )
        .route(
            "/api/v1/tasks/{id}/reopen",
            post(api::tasks::tasks::reopen_task),
        )
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Add shared state
        .with_state(state)
        // CORS middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
