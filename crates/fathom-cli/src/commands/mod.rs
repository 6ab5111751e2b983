//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config and snapshot loading, forecast overrides)
//! - `analysis` - Snapshot commands (report, health, advice, forecast)
//! - `setup` - Starter files and config inspection (sample, config)
//! - `serve` - Web server command

use num_format::{Locale, ToFormattedString as _};

pub mod analysis;
pub mod core;
pub mod serve;
pub mod setup;

// Re-export command functions for main.rs
pub use analysis::*;
pub use core::*;
pub use serve::*;
pub use setup::*;

/// Format a dollar amount with thousands separators, e.g. `-$1,234.50`
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_formatted_string(&Locale::en);

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, dollars, cents % 100)
}

/// Status marker for terminal output
pub fn status_icon(status: fathom_core::HealthStatus) -> &'static str {
    match status {
        fathom_core::HealthStatus::Good => "🟢",
        fathom_core::HealthStatus::Warning => "🟡",
        fathom_core::HealthStatus::Danger => "🔴",
    }
}
