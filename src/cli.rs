use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_BIND, DEFAULT_PORT};

const LONG_ABOUT: &str = r#"
Taskpulse - task-management backend with time-weighted statistics

Per-user task records with signup/login and bearer-token sessions, plus an
aggregate statistics endpoint that reports time elapsed and time remaining
across pending work, grouped by priority.

Quick start:
  export TASKPULSE_TOKEN_SECRET=change-me
  taskpulse serve --port 8000

API surface:
  POST   /api/auth/signup     register, returns a 30-day bearer token
  POST   /api/auth/login      authenticate, returns a bearer token
  GET    /api/tasks           list (filter/sort/paginate)
  POST   /api/tasks           create
  PATCH  /api/tasks/:id       partial update; status=finished stamps end_time
  DELETE /api/tasks/:id       delete
  GET    /api/tasks/stats     time-weighted summary statistics

Environment:
  TASKPULSE_TOKEN_SECRET  token signing secret (required)
  TASKPULSE_DB            database path (default ~/.taskpulse/taskpulse.db)
  TASKPULSE_CORS_ORIGINS  comma-separated origin allowlist (empty = any)
  TASKPULSE_LOG_FILE      write logs to a file instead of stdout
"#;

#[derive(Parser, Clone)]
#[command(name = "taskpulse")]
#[command(about = "Task-management backend - token auth, CRUD, time-weighted task statistics")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output (-q)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output logs in JSON format
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: String,

        /// Database file path (overrides TASKPULSE_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_serve_defaults() {
        let cli = Cli::try_parse_from(["taskpulse", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { port, bind, db } => {
                assert_eq!(port, DEFAULT_PORT);
                assert_eq!(bind, DEFAULT_BIND);
                assert!(db.is_none());
            },
        }
    }

    #[test]
    fn test_cli_parses_serve_overrides() {
        let cli = Cli::try_parse_from([
            "taskpulse", "-v", "serve", "--port", "9001", "--bind", "0.0.0.0", "--db", "/tmp/t.db",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Serve { port, bind, db } => {
                assert_eq!(port, 9001);
                assert_eq!(bind, "0.0.0.0");
                assert_eq!(db.unwrap(), PathBuf::from("/tmp/t.db"));
            },
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["taskpulse"]).is_err());
    }
}
