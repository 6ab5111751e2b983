//! Snapshot analysis commands (report, health, advice, forecast)

use std::path::Path;

use anyhow::{Context, Result};
use fathom_core::{
    aggregate, analyze_budget, compute_health, evaluate, project, recommend_with, BudgetAnalysis,
    DerivedTotals, FinancialReport, ForecastResult, GoalProjection, HealthMetrics,
};

use super::{load_engine_config, load_scenario, money, resolve_forecast, status_icon};
use crate::cli::ForecastArgs;

/// Build the full report for a snapshot file
pub fn build_report(
    input: &Path,
    config_path: Option<&Path>,
    args: &ForecastArgs,
) -> Result<FinancialReport> {
    let config = load_engine_config(config_path)?;
    let scenario = load_scenario(input)?;
    let params = resolve_forecast(&scenario, args)?;

    evaluate(&scenario.snapshot, &params, &config).context("Failed to evaluate snapshot")
}

pub fn cmd_report(
    input: &Path,
    config_path: Option<&Path>,
    args: &ForecastArgs,
    json: bool,
) -> Result<()> {
    let report = build_report(input, config_path, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("🌊 Fathom Report");
    println!("   Goal: {}", report.goal_label);
    println!("   ─────────────────────────────────────────────");

    print_totals(&report.totals);
    print_health(&report.health);

    println!();
    println!("💡 Recommendations");
    for rec in &report.recommendations {
        println!("   • {}", rec);
    }

    print_budget(&report.budget);
    print_forecast(&report.forecast);

    println!();
    println!(
        "   Net worth progress: {:.0}%",
        report.net_worth_progress * 100.0
    );

    Ok(())
}

pub fn cmd_health(input: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_engine_config(config_path)?;
    let scenario = load_scenario(input)?;

    let totals = aggregate(&scenario.snapshot);
    let health = compute_health(&totals, &scenario.snapshot, &config.thresholds);

    if json {
        let body = serde_json::json!({ "totals": totals, "health": health });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    print_totals(&totals);
    print_health(&health);
    Ok(())
}

pub fn cmd_advice(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_engine_config(config_path)?;
    let scenario = load_scenario(input)?;
    let snapshot = &scenario.snapshot;

    let totals = aggregate(snapshot);
    let health = compute_health(&totals, snapshot, &config.thresholds);
    let recommendations = recommend_with(&health, snapshot, &config.thresholds);

    println!();
    println!("💡 Recommendations");
    println!("   ─────────────────────────────────────────────");
    for (i, rec) in recommendations.iter().enumerate() {
        println!("   {}. {}", i + 1, rec);
    }

    print_budget(&analyze_budget(&totals, snapshot));
    Ok(())
}

pub fn cmd_forecast(
    input: &Path,
    config_path: Option<&Path>,
    args: &ForecastArgs,
    json: bool,
) -> Result<()> {
    let config = load_engine_config(config_path)?;
    let scenario = load_scenario(input)?;
    let params = resolve_forecast(&scenario, args)?;

    let totals = aggregate(&scenario.snapshot);
    let forecast = project(&totals, &scenario.snapshot, &params, &config.assumptions)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(());
    }

    println!();
    println!(
        "   Age {} → {} at {:.1}% annual return",
        params.current_age,
        params.retirement_age,
        params.annual_return * 100.0
    );
    print_forecast(&forecast);
    Ok(())
}

fn print_totals(totals: &DerivedTotals) {
    println!();
    println!("💵 Monthly Cash Flow");
    println!("   Income:         {:>14}", money(totals.monthly_income));
    println!("   Expenses:       {:>14}", money(totals.monthly_expenses));
    println!("   Debt payments:  {:>14}", money(totals.monthly_debt_payments));
    println!("   Net savings:    {:>14}", money(totals.monthly_savings));
    println!();
    println!("   Total assets:   {:>14}", money(totals.total_assets));
    println!("   Total debt:     {:>14}", money(totals.total_debt));
    println!("   Net worth:      {:>14}", money(totals.net_worth));
}

fn print_health(health: &HealthMetrics) {
    println!();
    println!(
        "🩺 Health Score: {:.0}/100 {} {}",
        health.score.total,
        status_icon(health.score.band),
        health.score.band
    );
    println!(
        "   {:22} │ {:>9} │ {}",
        "Metric", "Value", "Status"
    );
    println!("   ───────────────────────┼───────────┼──────────");

    let rows = [
        ("Savings rate", &health.savings_rate, "%"),
        ("Debt-to-income", &health.debt_to_income, "%"),
        ("Housing-to-income", &health.housing_to_income, "%"),
        ("Emergency fund", &health.emergency_months, " mo"),
        ("Debt-to-asset", &health.debt_to_asset, "%"),
    ];
    for (label, reading, unit) in rows {
        println!(
            "   {:22} │ {:>9} │ {} {}",
            label,
            format!("{:.1}{}", reading.value, unit),
            status_icon(reading.status),
            reading.status
        );
    }

    let s = &health.score;
    println!();
    println!(
        "   Score breakdown: savings {:.1}/25, debt {:.1}/25, emergency {:.1}/25, housing {:.1}/15, net worth {:.1}/10",
        s.savings, s.debt, s.emergency, s.housing, s.net_worth
    );
}

fn print_budget(budget: &BudgetAnalysis) {
    println!();
    println!("📊 Budget (50/30/20)");
    println!(
        "   {:16} │ {:>8} │ {:>8}",
        "Bucket", "Current", "Ideal"
    );
    println!("   ─────────────────┼──────────┼──────────");
    for row in &budget.comparison {
        println!(
            "   {:16} │ {:>7.1}% │ {:>7.1}%",
            row.category, row.current, row.ideal
        );
    }

    println!();
    for suggestion in &budget.suggestions {
        println!("   • {}", suggestion);
    }
}

fn print_forecast(forecast: &ForecastResult) {
    println!();
    println!("🎯 Goal");
    match forecast.goal.years_to_goal() {
        Some(years) => println!("   Reached in {:.1} years", years),
        None => {
            println!("   ⚠️  Not reachable: monthly savings must be positive to make progress.")
        }
    }
    if let GoalProjection::Projected {
        within_timeline,
        shortfall,
        truncated,
        ..
    } = &forecast.goal
    {
        if *truncated {
            println!("   (projection chart cut at the maximum horizon)");
        }
        if *within_timeline {
            println!("   ✅ On schedule");
        } else if let Some(gap) = shortfall {
            println!(
                "   ⚠️  Behind schedule: save {} per month ({} more than now)",
                money(gap.required_monthly),
                money(gap.gap)
            );
        }
    }

    let r = &forecast.retirement;
    println!();
    println!("🏖️  Retirement at {}", r.retirement_age);
    println!("   Years to go:        {:>14}", r.years_to_retirement);
    println!("   Projected savings:  {:>14}", money(r.total_savings));
    println!("   Monthly income:     {:>14}", money(r.monthly_income));
    println!(
        "   Income replacement: {:>13.1}% ({})",
        r.replacement_ratio, r.status
    );

    let w = &forecast.what_if;
    println!();
    println!(
        "🔮 What if you saved {} more per month?",
        money(w.additional_savings)
    );
    println!("   Projected savings:  {:>14}", money(w.new_total_savings));
    println!("   Monthly income:     {:>14}", money(w.new_monthly_income));
    println!(
        "   Increase:           {:>14} (+{:.1}%)",
        money(w.income_increase),
        w.income_increase_percent
    );
}
