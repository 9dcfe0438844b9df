use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServeConfig;
use crate::db;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<ServeConfig>,
}

/// API server instance
pub struct ApiServer {
    config: ServeConfig,
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

impl ApiServer {
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    /// Run the API server until the process is stopped.
    pub async fn run(self) -> Result<()> {
        if let Some(parent) = self.config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let db_pool = db::create_pool(&self.config.db_path)
            .await
            .context("Failed to open database")?;
        db::run_migrations(&db_pool)
            .await
            .context("Failed to run migrations")?;

        let addr = format!("{}:{}", self.config.bind, self.config.port);
        let db_path = self.config.db_path.clone();

        let state = AppState {
            db_pool,
            config: Arc::new(self.config),
        };
        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        tracing::info!("API server listening on {}", addr);
        tracing::info!("Database: {}", db_path.display());

        axum::serve(listener, app).await.context("Server error")?;

        Ok(())
    }
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    use super::routes;

    let api_routes = Router::new()
        .route("/health", get(health_handler))
        .merge(routes::api_routes());

    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest("/api", api_routes)
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Browser origin policy: an explicit allowlist when configured, otherwise
/// open (mirrors serving non-browser clients like curl).
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse::<HeaderValue>().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(allowed))
    }
}

/// Health check handler
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "taskpulse".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 404 Not Found handler
async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not found",
            "code": "NOT_FOUND"
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            service: "taskpulse".to_string(),
            version: "1.0.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("taskpulse"));
    }

    #[test]
    fn test_cors_layer_accepts_origin_list() {
        let _layer = cors_layer(&["http://localhost:3000".to_string()]);
        let _open = cors_layer(&[]);
    }
}
