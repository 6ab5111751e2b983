//! Fathom CLI - Personal finance health metrics and forecasts
//!
//! Usage:
//!   fathom sample > me.toml          Write a sample snapshot
//!   fathom report --input me.toml    Full report
//!   fathom forecast --input me.toml  Goal and retirement projections
//!   fathom serve --port 3000         Start the JSON API

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Report {
            input,
            forecast,
            json,
        } => commands::cmd_report(&input, config_path, &forecast, json),
        Commands::Health { input, json } => commands::cmd_health(&input, config_path, json),
        Commands::Advice { input } => commands::cmd_advice(&input, config_path),
        Commands::Forecast {
            input,
            forecast,
            json,
        } => commands::cmd_forecast(&input, config_path, &forecast, json),
        Commands::Sample { format } => commands::cmd_sample(format),
        Commands::Config => commands::cmd_config(config_path),
        Commands::Serve {
            port,
            host,
            allowed_origins,
        } => commands::cmd_serve(config_path, &host, port, allowed_origins).await,
    }
}
