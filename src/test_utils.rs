#[cfg(test)]
pub mod test_helpers {
    use crate::auth::AuthManager;
    use crate::db::{create_pool, run_migrations};
    use sqlx::SqlitePool;
    use tempfile::TempDir;

    pub const TEST_SECRET: &[u8] = b"test-secret-not-for-production";

    pub struct TestContext {
        pub pool: SqlitePool,
        pub _temp_dir: TempDir,
    }

    impl TestContext {
        pub async fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let db_path = temp_dir.path().join("taskpulse.db");

            let pool = create_pool(&db_path).await.unwrap();
            run_migrations(&pool).await.unwrap();

            Self {
                pool,
                _temp_dir: temp_dir,
            }
        }

        pub fn pool(&self) -> &SqlitePool {
            &self.pool
        }

        /// Signs up a fresh user and returns its id.
        pub async fn create_user(&self, email: &str) -> i64 {
            let auth = AuthManager::new(&self.pool, TEST_SECRET);
            let (_token, user) = auth.signup(email, "password123").await.unwrap();
            user.id
        }
    }
}
