//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Fathom - See how deep your finances go
#[derive(Parser)]
#[command(name = "fathom")]
#[command(about = "Personal finance health metrics and forecasts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config override (TOML)
    ///
    /// Defaults to the platform data directory (fathom/config/engine.toml)
    /// when present, otherwise the built-in thresholds.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full report: totals, health, advice, budget and forecasts
    Report {
        /// Snapshot file (.toml or .json)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        forecast: ForecastArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Health metrics and composite score
    Health {
        /// Snapshot file (.toml or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recommendations and budget suggestions
    Advice {
        /// Snapshot file (.toml or .json)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Goal, retirement and what-if projections
    Forecast {
        /// Snapshot file (.toml or .json)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        forecast: ForecastArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a sample snapshot to start from
    Sample {
        #[arg(short, long, value_enum, default_value = "toml")]
        format: SampleFormat,
    },

    /// Show the effective engine configuration
    Config,

    /// Start the JSON API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable; same-origin only if omitted)
        #[arg(long = "allowed-origin")]
        allowed_origins: Vec<String>,
    },
}

/// Forecast overrides; each one replaces the value from the snapshot's `[forecast]` table
#[derive(Args, Debug, Clone, Default)]
pub struct ForecastArgs {
    /// Planned retirement age
    #[arg(long)]
    pub retirement_age: Option<u32>,

    /// Current age
    #[arg(long)]
    pub current_age: Option<u32>,

    /// Expected annual return in percent (e.g. 7)
    #[arg(long)]
    pub return_rate: Option<f64>,

    /// Extra monthly savings for the what-if scenario
    #[arg(long)]
    pub extra_savings: Option<f64>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    Toml,
    Json,
}
