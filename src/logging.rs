//! Logging setup.
//!
//! Structured logging via the tracing crate, with console, JSON, and file
//! output variants selected from CLI flags and environment.

use std::io::{self, IsTerminal};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Logging configuration options
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to output
    pub level: Level,
    /// Enable colored output
    pub color: bool,
    /// Show timestamps
    pub show_timestamps: bool,
    /// Show target/module name
    pub show_target: bool,
    /// Enable JSON format for machine parsing
    pub json_format: bool,
    /// Enable span events for tracing
    pub enable_spans: bool,
    /// Output to file instead of stdout (for service deployments)
    pub file_output: Option<std::path::PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            color: true,
            show_timestamps: true,
            show_target: false,
            json_format: false,
            enable_spans: false,
            file_output: None,
        }
    }
}

impl LoggingConfig {
    /// Create config from CLI arguments.
    ///
    /// `TASKPULSE_LOG_FILE` redirects output to a file (ANSI off).
    pub fn from_args(quiet: bool, verbose: bool, json: bool) -> Self {
        let level = if verbose {
            Level::DEBUG
        } else if quiet {
            Level::ERROR
        } else {
            Level::INFO
        };

        let file_output = std::env::var("TASKPULSE_LOG_FILE")
            .ok()
            .map(std::path::PathBuf::from);

        Self {
            level,
            color: !quiet && !json && file_output.is_none() && io::stdout().is_terminal(),
            show_timestamps: true,
            show_target: verbose,
            json_format: json,
            enable_spans: verbose,
            file_output,
        }
    }
}

/// Initialize the logging system
pub fn init_logging(config: LoggingConfig) -> io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "taskpulse={level},tower_http={level}",
            level = config.level
        ))
    });

    let registry = Registry::default().with(env_filter);

    if let Some(log_file) = config.file_output {
        let file_appender = tracing_appender::rolling::never(
            log_file.parent().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "Invalid log file path")
            })?,
            log_file.file_name().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "Invalid log file name")
            })?,
        );

        if config.json_format {
            let json_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(config.enable_spans)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(file_appender);
            json_layer.with_subscriber(registry).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_target(config.show_target)
                .with_level(true)
                .with_ansi(false)
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_writer(file_appender);
            fmt_layer.with_subscriber(registry).init();
        }
    } else if config.json_format {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(config.enable_spans)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(io::stdout);
        json_layer.with_subscriber(registry).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_target(config.show_target)
            .with_level(true)
            .with_ansi(config.color)
            .with_writer(io::stdout);

        if config.show_timestamps {
            fmt_layer
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_subscriber(registry)
                .init();
        } else {
            fmt_layer.with_subscriber(registry).init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args_levels() {
        assert_eq!(LoggingConfig::from_args(false, false, false).level, Level::INFO);
        assert_eq!(LoggingConfig::from_args(false, true, false).level, Level::DEBUG);
        assert_eq!(LoggingConfig::from_args(true, false, false).level, Level::ERROR);
    }

    #[test]
    fn test_json_disables_color() {
        let config = LoggingConfig::from_args(false, false, true);
        assert!(config.json_format);
        assert!(!config.color);
    }
}
