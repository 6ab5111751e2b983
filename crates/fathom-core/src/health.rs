//! Health Metrics Calculator
//!
//! Derives the five ratios from the totals, classifies each against a
//! `ThresholdScale`, and computes the composite health score.
//!
//! Every ratio is guarded: a zero denominator yields 0.

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::models::{DerivedTotals, FinancialSnapshot, HealthMetrics, HealthScore, HealthStatus, MetricReading};

/// Score component caps (sum to 100)
const SAVINGS_WEIGHT: f64 = 25.0;
const DEBT_WEIGHT: f64 = 25.0;
const EMERGENCY_WEIGHT: f64 = 25.0;
const HOUSING_WEIGHT: f64 = 15.0;
const NET_WORTH_WEIGHT: f64 = 10.0;

/// Savings rate (%) that earns the full savings component
const FULL_SCORE_SAVINGS_RATE: f64 = 30.0;
/// Debt-to-income (%) at which the debt component reaches zero
const ZERO_SCORE_DEBT_TO_INCOME: f64 = 50.0;
/// Months of coverage that earn the full emergency component
const FULL_SCORE_EMERGENCY_MONTHS: f64 = 12.0;
/// Housing ratio (%) at which the housing component reaches zero
const ZERO_SCORE_HOUSING_RATIO: f64 = 40.0;
/// Net worth, in years of income, that earns the full net worth component
const FULL_SCORE_NET_WORTH_YEARS: f64 = 10.0;

/// Gauge zones for the total score
const SCORE_WARNING_FLOOR: f64 = 30.0;
const SCORE_GOOD_FLOOR: f64 = 60.0;

/// Which way is better for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Ordered cutoffs splitting a metric into three tiers
///
/// A value equal to a cutoff falls in the tier above it, so for
/// `HigherIsBetter` with cutoffs `[10, 20]`, 10 is `Warning` and 20 is `Good`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdScale {
    pub direction: Direction,
    /// `[lower, upper]`, ascending
    pub cutoffs: [f64; 2],
}

impl ThresholdScale {
    pub const fn new(direction: Direction, lower: f64, upper: f64) -> Self {
        Self {
            direction,
            cutoffs: [lower, upper],
        }
    }

    pub fn classify(&self, value: f64) -> HealthStatus {
        let tiers = match self.direction {
            Direction::HigherIsBetter => [HealthStatus::Danger, HealthStatus::Warning, HealthStatus::Good],
            Direction::LowerIsBetter => [HealthStatus::Good, HealthStatus::Warning, HealthStatus::Danger],
        };
        let passed = self.cutoffs.iter().filter(|cutoff| value >= **cutoff).count();
        tiers[passed]
    }

    pub fn reading(&self, value: f64) -> MetricReading {
        MetricReading {
            value,
            status: self.classify(value),
        }
    }
}

/// `numerator / denominator × scale`, or 0 when the denominator is 0
pub fn guarded_ratio(numerator: f64, denominator: f64, scale: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * scale
    }
}

/// Raw metric values before classification
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    pub savings_rate: f64,
    pub debt_to_income: f64,
    pub housing_to_income: f64,
    pub emergency_months: f64,
    pub debt_to_asset: f64,
}

impl Ratios {
    pub fn compute(totals: &DerivedTotals, snapshot: &FinancialSnapshot) -> Self {
        let income = totals.monthly_income;
        Self {
            savings_rate: guarded_ratio(totals.monthly_savings, income, 100.0),
            debt_to_income: guarded_ratio(totals.monthly_debt_payments, income, 100.0),
            housing_to_income: guarded_ratio(snapshot.expenses.housing, income, 100.0),
            emergency_months: guarded_ratio(
                snapshot.assets.emergency_fund,
                totals.monthly_expenses,
                1.0,
            ),
            debt_to_asset: guarded_ratio(totals.total_debt, totals.total_assets, 100.0),
        }
    }
}

/// Weighted 0-100 score from the ratios and net worth
pub fn score(ratios: &Ratios, totals: &DerivedTotals) -> HealthScore {
    let savings = (ratios.savings_rate / FULL_SCORE_SAVINGS_RATE * SAVINGS_WEIGHT)
        .clamp(0.0, SAVINGS_WEIGHT);
    let debt = ((ZERO_SCORE_DEBT_TO_INCOME - ratios.debt_to_income) / ZERO_SCORE_DEBT_TO_INCOME
        * DEBT_WEIGHT)
        .clamp(0.0, DEBT_WEIGHT);
    let emergency = (ratios.emergency_months / FULL_SCORE_EMERGENCY_MONTHS * EMERGENCY_WEIGHT)
        .clamp(0.0, EMERGENCY_WEIGHT);
    let housing = ((ZERO_SCORE_HOUSING_RATIO - ratios.housing_to_income)
        / ZERO_SCORE_HOUSING_RATIO
        * HOUSING_WEIGHT)
        .clamp(0.0, HOUSING_WEIGHT);
    let net_worth = guarded_ratio(
        totals.net_worth,
        totals.monthly_income * 12.0 * FULL_SCORE_NET_WORTH_YEARS,
        NET_WORTH_WEIGHT,
    )
    .clamp(0.0, NET_WORTH_WEIGHT);

    let total = (savings + debt + emergency + housing + net_worth).clamp(0.0, 100.0);

    HealthScore {
        total,
        savings,
        debt,
        emergency,
        housing,
        net_worth,
        band: score_band(total),
    }
}

/// Gauge zone for a total score: below 30 danger, below 60 warning
pub fn score_band(total: f64) -> HealthStatus {
    ThresholdScale::new(
        Direction::HigherIsBetter,
        SCORE_WARNING_FLOOR,
        SCORE_GOOD_FLOOR,
    )
    .classify(total)
}

/// Compute every health metric and the composite score
pub fn compute_health(
    totals: &DerivedTotals,
    snapshot: &FinancialSnapshot,
    thresholds: &Thresholds,
) -> HealthMetrics {
    let ratios = Ratios::compute(totals, snapshot);

    HealthMetrics {
        savings_rate: thresholds.savings_rate.reading(ratios.savings_rate),
        debt_to_income: thresholds.debt_to_income.reading(ratios.debt_to_income),
        housing_to_income: thresholds.housing_to_income.reading(ratios.housing_to_income),
        emergency_months: thresholds.emergency_months.reading(ratios.emergency_months),
        debt_to_asset: thresholds.debt_to_asset.reading(ratios.debt_to_asset),
        score: score(&ratios, totals),
    }
}
