//! Shedwright CLI entry point.

use clap::Parser;

use shedwright::cli::commands::{self, load_config};
use shedwright::cli::{handle_error, Cli, Commands};
use shedwright::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(err, cli.json),
    };
    let _logger = match LoggerImpl::init(&config.logging) {
        Ok(logger) => logger,
        Err(err) => handle_error(err, cli.json),
    };

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(args, cli.json).await,
        Commands::Merge(args) => commands::merge::execute(args, cli.json).await,
        Commands::Assist(args) => commands::assist::execute(args, config, cli.json).await,
        Commands::Telemetry(args) => commands::telemetry::execute(args, config, cli.json).await,
        Commands::Weather(args) => commands::weather::execute(args, config, cli.json).await,
        Commands::Estimate(args) => commands::estimate::execute(args, cli.json).await,
        Commands::Insure(args) => commands::insure::execute(args, config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
