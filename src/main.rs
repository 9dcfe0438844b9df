use clap::Parser;
use taskpulse::cli::{Cli, Commands};
use taskpulse::config::ServeConfig;
use taskpulse::logging::LoggingConfig;
use taskpulse::server::ApiServer;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = LoggingConfig::from_args(cli.quiet, cli.verbose > 0, cli.json);
    if let Err(e) = taskpulse::logging::init_logging(log_config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    match cli.command.clone() {
        Commands::Serve { port, bind, db } => {
            let config = ServeConfig::resolve(port, bind, db)?;
            ApiServer::new(config).run().await
        },
    }
}
