//! Starter file and configuration commands

use std::path::Path;

use anyhow::Result;
use fathom_core::{default_config_path, FinancialSnapshot, ForecastParams, Scenario};

use super::load_engine_config;
use crate::cli::SampleFormat;

/// The sample scenario rendered in the requested format
pub fn render_sample(format: SampleFormat) -> Result<String> {
    let scenario = Scenario {
        snapshot: FinancialSnapshot::sample(),
        forecast: Some(ForecastParams::default()),
    };

    Ok(match format {
        SampleFormat::Toml => toml::to_string_pretty(&scenario)?,
        SampleFormat::Json => serde_json::to_string_pretty(&scenario)?,
    })
}

pub fn cmd_sample(format: SampleFormat) -> Result<()> {
    println!("{}", render_sample(format)?);
    Ok(())
}

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let config = load_engine_config(config_path)?;

    let source = match config_path {
        Some(path) => format!("{}", path.display()),
        None => match default_config_path() {
            Some(path) if path.exists() => format!("{}", path.display()),
            Some(path) => format!("built-in defaults (override at {})", path.display()),
            None => "built-in defaults".to_string(),
        },
    };

    println!("# Source: {}", source);
    println!();
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
