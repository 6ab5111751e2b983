//! Report Assembler
//!
//! Runs the full pipeline for one snapshot: aggregate, health metrics,
//! recommendations, budget analysis and forecasts. Every call computes from
//! scratch; nothing is cached between evaluations.

use chrono::Utc;

use crate::aggregate::aggregate;
use crate::budget::analyze_budget;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::forecast::project;
use crate::health::compute_health;
use crate::models::{CashFlowBar, DerivedTotals, FinancialReport, FinancialSnapshot, ForecastParams};
use crate::recommend::recommend_with;

/// Income, expense, debt payment and savings bars for the cash-flow chart
pub fn cash_flow(totals: &DerivedTotals) -> Vec<CashFlowBar> {
    [
        ("Income", totals.monthly_income),
        ("Expenses", totals.monthly_expenses),
        ("Debt Payments", totals.monthly_debt_payments),
        ("Savings", totals.monthly_savings),
    ]
    .into_iter()
    .map(|(label, amount)| CashFlowBar {
        label: label.to_string(),
        amount,
    })
    .collect()
}

/// Net worth against twice total assets, clamped to 0-1
pub fn net_worth_progress(totals: &DerivedTotals) -> f64 {
    if totals.total_assets <= 0.0 {
        return 0.0;
    }
    (totals.net_worth / (totals.total_assets * 2.0)).clamp(0.0, 1.0)
}

/// Validate the inputs and build the complete report
pub fn evaluate(
    snapshot: &FinancialSnapshot,
    params: &ForecastParams,
    config: &EngineConfig,
) -> Result<FinancialReport> {
    snapshot.validate()?;
    params.validate()?;

    let totals = aggregate(snapshot);
    let health = compute_health(&totals, snapshot, &config.thresholds);
    let recommendations = recommend_with(&health, snapshot, &config.thresholds);
    let budget = analyze_budget(&totals, snapshot);
    let forecast = project(&totals, snapshot, params, &config.assumptions)?;

    tracing::debug!(
        score = health.score.total,
        band = %health.score.band,
        recommendations = recommendations.len(),
        "Evaluated financial snapshot"
    );

    Ok(FinancialReport {
        generated_at: Utc::now(),
        goal_label: snapshot.goal.kind.label().to_string(),
        cash_flow: cash_flow(&totals),
        net_worth_progress: net_worth_progress(&totals),
        totals,
        health,
        recommendations,
        budget,
        forecast,
    })
}
