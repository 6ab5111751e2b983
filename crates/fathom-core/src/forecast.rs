//! Forecast Projector
//!
//! - Goal timeline: linear accumulation of current annual savings
//! - Retirement: compound growth of the current balance plus an ordinary
//!   annuity of yearly contributions, converted to income with the
//!   withdrawal rule
//! - What-if: the retirement forecast again with extra monthly savings

use crate::config::Assumptions;
use crate::error::Result;
use crate::health::guarded_ratio;
use crate::models::{
    DerivedTotals, FinancialSnapshot, ForecastParams, ForecastResult, GoalProjection,
    ProjectionPoint, RetirementProjection, RetirementStatus, SavingsShortfall, WhatIfScenario,
};

/// Project how long the goal takes at the current savings rate
pub fn project_goal(
    totals: &DerivedTotals,
    snapshot: &FinancialSnapshot,
    max_years: u32,
) -> GoalProjection {
    let annual_savings = totals.monthly_savings * 12.0;
    if annual_savings <= 0.0 {
        return GoalProjection::Unreachable;
    }

    let goal_amount = snapshot.goal.amount;
    let years_to_goal = goal_amount / annual_savings;

    let horizon = years_to_goal.ceil();
    let truncated = horizon > max_years as f64;
    let last_year = if truncated { max_years } else { horizon as u32 };

    let series = (0..=last_year)
        .map(|year| ProjectionPoint {
            year,
            projected: annual_savings * year as f64,
            goal: goal_amount,
        })
        .collect();

    let timeline = snapshot.goal.timeline_years;
    let within_timeline = years_to_goal <= timeline as f64;
    let shortfall = if within_timeline {
        None
    } else {
        let required_monthly = goal_amount / (timeline as f64 * 12.0);
        Some(SavingsShortfall {
            required_monthly,
            gap: required_monthly - totals.monthly_savings,
        })
    };

    GoalProjection::Projected {
        years_to_goal,
        series,
        within_timeline,
        shortfall,
        truncated,
    }
}

/// Future value of `annual_contribution` paid at the end of each year
///
/// Falls back to simple accumulation when the rate is zero.
pub fn annuity_future_value(annual_contribution: f64, rate: f64, years: u32) -> f64 {
    if rate == 0.0 {
        return annual_contribution * years as f64;
    }
    annual_contribution * (((1.0 + rate).powf(f64::from(years)) - 1.0) / rate)
}

/// Future value of a lump sum compounded annually
pub fn compound(balance: f64, rate: f64, years: u32) -> f64 {
    balance * (1.0 + rate).powf(f64::from(years))
}

/// Future value of the contributions when `monthly_savings` are partly
/// redirected to retirement
fn contributions_future_value(
    monthly_savings: f64,
    params: &ForecastParams,
    assumptions: &Assumptions,
) -> f64 {
    let annual_contribution = monthly_savings * assumptions.retirement_contribution_share * 12.0;
    annuity_future_value(
        annual_contribution,
        params.annual_return,
        params.years_to_retirement(),
    )
}

fn monthly_income_from(balance: f64, assumptions: &Assumptions) -> f64 {
    balance * assumptions.withdrawal_rate / 12.0
}

/// Project the retirement balance and the income it supports
pub fn project_retirement(
    totals: &DerivedTotals,
    snapshot: &FinancialSnapshot,
    params: &ForecastParams,
    assumptions: &Assumptions,
) -> RetirementProjection {
    let years = params.years_to_retirement();

    let balance_future_value = compound(snapshot.assets.retirement, params.annual_return, years);
    let contributions_future_value =
        contributions_future_value(totals.monthly_savings, params, assumptions);
    let total_savings = balance_future_value + contributions_future_value;
    let monthly_income = monthly_income_from(total_savings, assumptions);

    let replacement_ratio = guarded_ratio(monthly_income, totals.monthly_income, 100.0);
    let status = if replacement_ratio < assumptions.replacement_target {
        RetirementStatus::Warning
    } else {
        RetirementStatus::OnTrack
    };

    RetirementProjection {
        retirement_age: params.retirement_age,
        years_to_retirement: years,
        balance_future_value,
        contributions_future_value,
        total_savings,
        monthly_income,
        replacement_ratio,
        replacement_progress: (replacement_ratio / 100.0).clamp(0.0, 1.0),
        status,
    }
}

/// Re-run the retirement forecast with `additional_savings` added to monthly savings
pub fn project_what_if(
    totals: &DerivedTotals,
    params: &ForecastParams,
    assumptions: &Assumptions,
    baseline: &RetirementProjection,
) -> WhatIfScenario {
    let new_monthly_savings = totals.monthly_savings + params.additional_savings;
    let new_contributions_future_value =
        contributions_future_value(new_monthly_savings, params, assumptions);
    let new_total_savings = baseline.balance_future_value + new_contributions_future_value;
    let new_monthly_income = monthly_income_from(new_total_savings, assumptions);

    let income_increase = new_monthly_income - baseline.monthly_income;
    let income_increase_percent = if baseline.monthly_income > 0.0 {
        income_increase / baseline.monthly_income * 100.0
    } else {
        0.0
    };

    WhatIfScenario {
        additional_savings: params.additional_savings,
        new_monthly_savings,
        new_contributions_future_value,
        new_total_savings,
        new_monthly_income,
        income_increase,
        income_increase_percent,
    }
}

/// Run the goal, retirement and what-if projections
///
/// Fails if the forecast parameters are invalid (e.g. already at retirement age).
pub fn project(
    totals: &DerivedTotals,
    snapshot: &FinancialSnapshot,
    params: &ForecastParams,
    assumptions: &Assumptions,
) -> Result<ForecastResult> {
    params.validate()?;

    let goal = project_goal(totals, snapshot, assumptions.max_projection_years);
    let retirement = project_retirement(totals, snapshot, params, assumptions);
    let what_if = project_what_if(totals, params, assumptions, &retirement);

    Ok(ForecastResult {
        goal,
        retirement,
        what_if,
    })
}
