//! Engine configuration
//!
//! Holds the classification cutoffs and the fixed forecasting assumptions
//! (withdrawal rate, retirement contribution share, replacement target).
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/fathom/config/engine.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Override files may be partial; anything missing keeps the default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::health::{Direction, ThresholdScale};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Per-metric classification scales
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub savings_rate: ThresholdScale,
    pub emergency_months: ThresholdScale,
    pub debt_to_income: ThresholdScale,
    pub housing_to_income: ThresholdScale,
    pub debt_to_asset: ThresholdScale,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            savings_rate: ThresholdScale::new(Direction::HigherIsBetter, 10.0, 20.0),
            emergency_months: ThresholdScale::new(Direction::HigherIsBetter, 3.0, 6.0),
            debt_to_income: ThresholdScale::new(Direction::LowerIsBetter, 28.0, 36.0),
            housing_to_income: ThresholdScale::new(Direction::LowerIsBetter, 25.0, 33.0),
            debt_to_asset: ThresholdScale::new(Direction::LowerIsBetter, 30.0, 60.0),
        }
    }
}

/// Fixed assumptions behind the forecasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Annual withdrawal as a fraction of the retirement balance
    pub withdrawal_rate: f64,
    /// Fraction of monthly net savings contributed to retirement
    pub retirement_contribution_share: f64,
    /// Replacement ratio (percent) at or above which retirement is on track
    pub replacement_target: f64,
    /// Maximum number of years in a goal projection series
    pub max_projection_years: u32,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            withdrawal_rate: 0.04,
            retirement_contribution_share: 0.5,
            replacement_target: 70.0,
            max_projection_years: 100,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub thresholds: Thresholds,
    pub assumptions: Assumptions,
}

impl EngineConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit override file (embedded defaults if it does not exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse config from TOML content, merged over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    pub fn validate(&self) -> Result<()> {
        let scales = [
            ("savings_rate", &self.thresholds.savings_rate),
            ("emergency_months", &self.thresholds.emergency_months),
            ("debt_to_income", &self.thresholds.debt_to_income),
            ("housing_to_income", &self.thresholds.housing_to_income),
            ("debt_to_asset", &self.thresholds.debt_to_asset),
        ];
        for (name, scale) in scales {
            let [lower, upper] = scale.cutoffs;
            if !lower.is_finite() || !upper.is_finite() || lower > upper {
                return Err(Error::Config(format!(
                    "thresholds.{}: cutoffs must be ascending finite numbers (got [{}, {}])",
                    name, lower, upper
                )));
            }
        }

        let a = &self.assumptions;
        if !(a.withdrawal_rate > 0.0 && a.withdrawal_rate <= 1.0) {
            return Err(Error::Config(format!(
                "assumptions.withdrawal_rate must be in (0, 1] (got {})",
                a.withdrawal_rate
            )));
        }
        if !(0.0..=1.0).contains(&a.retirement_contribution_share) {
            return Err(Error::Config(format!(
                "assumptions.retirement_contribution_share must be in [0, 1] (got {})",
                a.retirement_contribution_share
            )));
        }
        if !a.replacement_target.is_finite() || a.replacement_target < 0.0 {
            return Err(Error::Config(format!(
                "assumptions.replacement_target must be a non-negative percentage (got {})",
                a.replacement_target
            )));
        }
        if a.max_projection_years == 0 {
            return Err(Error::Config(
                "assumptions.max_projection_years must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fathom").join("config").join("engine.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<EngineConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading engine config override");
            fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    thresholds: Option<RawThresholds>,
    assumptions: Option<RawAssumptions>,
}

#[derive(Debug, Deserialize)]
struct RawThresholds {
    savings_rate: Option<RawScale>,
    emergency_months: Option<RawScale>,
    debt_to_income: Option<RawScale>,
    housing_to_income: Option<RawScale>,
    debt_to_asset: Option<RawScale>,
}

#[derive(Debug, Deserialize)]
struct RawScale {
    direction: Option<Direction>,
    cutoffs: Option<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct RawAssumptions {
    withdrawal_rate: Option<f64>,
    retirement_contribution_share: Option<f64>,
    replacement_target: Option<f64>,
    max_projection_years: Option<u32>,
}

fn merge_scale(scale: &mut ThresholdScale, raw: Option<RawScale>) {
    if let Some(raw) = raw {
        if let Some(direction) = raw.direction {
            scale.direction = direction;
        }
        if let Some(cutoffs) = raw.cutoffs {
            scale.cutoffs = cutoffs;
        }
    }
}

fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(thresholds) = raw.thresholds {
        let t = &mut config.thresholds;
        merge_scale(&mut t.savings_rate, thresholds.savings_rate);
        merge_scale(&mut t.emergency_months, thresholds.emergency_months);
        merge_scale(&mut t.debt_to_income, thresholds.debt_to_income);
        merge_scale(&mut t.housing_to_income, thresholds.housing_to_income);
        merge_scale(&mut t.debt_to_asset, thresholds.debt_to_asset);
    }

    if let Some(assumptions) = raw.assumptions {
        let a = &mut config.assumptions;
        if let Some(rate) = assumptions.withdrawal_rate {
            a.withdrawal_rate = rate;
        }
        if let Some(share) = assumptions.retirement_contribution_share {
            a.retirement_contribution_share = share;
        }
        if let Some(target) = assumptions.replacement_target {
            a.replacement_target = target;
        }
        if let Some(years) = assumptions.max_projection_years {
            a.max_projection_years = years;
        }
    }

    config.validate()?;
    Ok(config)
}
