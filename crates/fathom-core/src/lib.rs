//! Fathom Core Library
//!
//! Financial metrics and forecast engine for a household snapshot:
//! - Aggregation of income, expenses, debts and assets into monthly totals
//! - Health ratios classified against configurable thresholds, plus a 0-100 score
//! - Rule-based recommendations
//! - 50/30/20 budget analysis
//! - Goal, retirement and what-if projections
//! - One-call report assembly for dashboards and the API
//!
//! Everything here is pure computation over immutable inputs; the only I/O is
//! loading configuration and scenario files.

pub mod aggregate;
pub mod budget;
pub mod config;
pub mod error;
pub mod forecast;
pub mod health;
pub mod models;
pub mod recommend;
pub mod report;

/// Snapshot builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::aggregate;
pub use budget::analyze_budget;
pub use config::{default_config_path, Assumptions, EngineConfig, Thresholds};
pub use error::{Error, Result};
pub use forecast::{project, project_goal, project_retirement, project_what_if};
pub use health::{compute_health, Direction, ThresholdScale};
pub use models::*;
pub use recommend::{recommend, recommend_with, RecommendationEngine, RecommendationRule};
pub use report::evaluate;
