//! Common utilities for integration tests

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::SqlitePool;
use taskpulse::config::ServeConfig;
use taskpulse::db::{create_pool, run_migrations};
use taskpulse::server::{create_router, AppState};
use tempfile::TempDir;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Create a migrated pool backed by a temp-dir database.
///
/// The `TempDir` must be kept alive for the lifetime of the pool.
pub async fn setup_pool() -> (SqlitePool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("taskpulse.db");

    let pool = create_pool(&db_path).await.unwrap();
    run_migrations(&pool).await.unwrap();

    (pool, temp_dir)
}

/// A running API server bound to an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub base_url: String,
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

/// Spawn the full API router on 127.0.0.1:0 and return its base URL.
#[allow(dead_code)]
pub async fn spawn_server() -> TestServer {
    let (pool, temp_dir) = setup_pool().await;

    let config = ServeConfig {
        bind: "127.0.0.1".to_string(),
        port: 0,
        db_path: temp_dir.path().join("taskpulse.db"),
        token_secret: TEST_SECRET.to_string(),
        cors_origins: Vec::new(),
    };

    let state = AppState {
        db_pool: pool.clone(),
        config: Arc::new(config),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
        pool,
        _temp_dir: temp_dir,
    }
}
