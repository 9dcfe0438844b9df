use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use super::server::AppState;

/// Create API router with all endpoints
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth routes (no token required)
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        // Task routes (bearer token required via AuthUser extractor)
        .route(
            "/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        // Static path must be registered alongside /tasks/:id; axum prefers it
        .route("/tasks/stats", get(handlers::task_stats))
        .route(
            "/tasks/:id",
            axum::routing::patch(handlers::update_task).delete(handlers::delete_task),
        )
}
