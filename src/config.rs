//! Runtime configuration for the API server.
//!
//! CLI flags override environment variables:
//!   TASKPULSE_TOKEN_SECRET  required, signs session tokens
//!   TASKPULSE_DB            database file path
//!   TASKPULSE_CORS_ORIGINS  comma-separated origin allowlist (empty = any)

use anyhow::Context;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BIND: &str = "127.0.0.1";

#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub bind: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub token_secret: String,
    pub cors_origins: Vec<String>,
}

impl ServeConfig {
    /// Resolve the effective configuration from CLI arguments and env vars.
    pub fn resolve(port: u16, bind: String, db: Option<PathBuf>) -> anyhow::Result<Self> {
        let token_secret = std::env::var("TASKPULSE_TOKEN_SECRET")
            .context("TASKPULSE_TOKEN_SECRET is not set; refusing to start without a token signing secret")?;
        if token_secret.is_empty() {
            anyhow::bail!("TASKPULSE_TOKEN_SECRET must not be empty");
        }

        let db_path = match db {
            Some(path) => path,
            None => match std::env::var("TASKPULSE_DB") {
                Ok(path) => PathBuf::from(path),
                Err(_) => default_db_path(),
            },
        };

        let cors_origins = std::env::var("TASKPULSE_CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bind,
            port,
            db_path,
            token_secret,
            cors_origins,
        })
    }
}

/// Default database location: ~/.taskpulse/taskpulse.db
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskpulse")
        .join("taskpulse.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_under_home() {
        let path = default_db_path();
        assert!(path.ends_with(".taskpulse/taskpulse.db"));
    }
}
