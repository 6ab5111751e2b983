//! Shared utilities for the snapshot commands
//!
//! This module contains:
//! - `load_engine_config` - Resolve the engine config from `--config` or defaults
//! - `load_scenario` - Read and validate a snapshot file
//! - `resolve_forecast` - Merge forecast flags over the file's `[forecast]` table

use std::path::Path;

use anyhow::{Context, Result};
use fathom_core::{EngineConfig, ForecastParams, Scenario};

use crate::cli::ForecastArgs;

/// Load the engine config; an explicit path must exist
pub fn load_engine_config(config_path: Option<&Path>) -> Result<EngineConfig> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            EngineConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        None => EngineConfig::load().context("Failed to load engine config"),
    }
}

/// Read a snapshot file and check it before any computation
pub fn load_scenario(input: &Path) -> Result<Scenario> {
    let scenario = Scenario::load(input)
        .with_context(|| format!("Failed to read snapshot {}", input.display()))?;
    scenario
        .snapshot
        .validate()
        .with_context(|| format!("Invalid snapshot {}", input.display()))?;

    tracing::debug!(path = %input.display(), "Loaded snapshot");
    Ok(scenario)
}

/// Forecast parameters: defaults, then the file's `[forecast]` table, then flags
pub fn resolve_forecast(scenario: &Scenario, args: &ForecastArgs) -> Result<ForecastParams> {
    let mut params = scenario.forecast.clone().unwrap_or_default();

    if let Some(age) = args.retirement_age {
        params.retirement_age = age;
    }
    if let Some(age) = args.current_age {
        params.current_age = age;
    }
    if let Some(percent) = args.return_rate {
        params.annual_return = percent / 100.0;
    }
    if let Some(extra) = args.extra_savings {
        params.additional_savings = extra;
    }

    params.validate().context("Invalid forecast parameters")?;
    Ok(params)
}
