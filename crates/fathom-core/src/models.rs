//! Data models for Fathom
//!
//! Inputs (`FinancialSnapshot`, `ForecastParams`) are immutable value objects
//! built by the caller. Outputs are plain serializable structs produced fresh
//! on every evaluation.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest goal timeline accepted, in years
pub const MAX_GOAL_TIMELINE_YEARS: u32 = 30;

/// Oldest retirement age accepted
pub const MAX_RETIREMENT_AGE: u32 = 120;

// ========== Input Models ==========

/// Monthly income sources (after tax)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Income {
    pub salary: f64,
    pub side_income: f64,
    pub other: f64,
}

/// Monthly living expenses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expenses {
    /// Rent or mortgage
    pub housing: f64,
    pub utilities: f64,
    pub groceries: f64,
    pub transportation: f64,
    pub healthcare: f64,
    pub entertainment: f64,
    pub other: f64,
}

/// Outstanding debt balances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtBalances {
    pub student_loan: f64,
    pub car_loan: f64,
    pub credit_card: f64,
    pub mortgage: f64,
    pub other: f64,
}

/// Monthly payment per debt category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtPayments {
    pub student_loan: f64,
    pub car_loan: f64,
    pub credit_card: f64,
    pub mortgage: f64,
    pub other: f64,
}

/// Asset balances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assets {
    pub emergency_fund: f64,
    pub investments: f64,
    /// Retirement accounts (401k, IRA, ...)
    pub retirement: f64,
    pub property: f64,
    pub other: f64,
}

/// Primary financial goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    #[default]
    EmergencyFund,
    DebtPayoff,
    Retirement,
    House,
    Education,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::EmergencyFund => "emergency_fund",
            GoalType::DebtPayoff => "debt_payoff",
            GoalType::Retirement => "retirement",
            GoalType::House => "house",
            GoalType::Education => "education",
        }
    }

    /// Human-readable goal description
    pub fn label(&self) -> &'static str {
        match self {
            GoalType::EmergencyFund => "Build Emergency Fund",
            GoalType::DebtPayoff => "Pay Off Debt",
            GoalType::Retirement => "Save for Retirement",
            GoalType::House => "Save for House",
            GoalType::Education => "Save for Education",
        }
    }

    pub fn all() -> &'static [GoalType] {
        &[
            GoalType::EmergencyFund,
            GoalType::DebtPayoff,
            GoalType::Retirement,
            GoalType::House,
            GoalType::Education,
        ]
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "emergency_fund" => Ok(GoalType::EmergencyFund),
            "debt_payoff" => Ok(GoalType::DebtPayoff),
            "retirement" => Ok(GoalType::Retirement),
            "house" => Ok(GoalType::House),
            "education" => Ok(GoalType::Education),
            _ => Err(format!("Unknown goal type: {}", s)),
        }
    }
}

/// Savings goal with a target amount and timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goal {
    pub kind: GoalType,
    pub amount: f64,
    pub timeline_years: u32,
}

impl Default for Goal {
    fn default() -> Self {
        Self {
            kind: GoalType::EmergencyFund,
            amount: 30_000.0,
            timeline_years: 5,
        }
    }
}

/// Everything the user entered about their finances
///
/// Missing sections deserialize to zero so partial files are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSnapshot {
    pub income: Income,
    pub expenses: Expenses,
    pub debts: DebtBalances,
    pub debt_payments: DebtPayments,
    pub assets: Assets,
    pub goal: Goal,
}

impl FinancialSnapshot {
    /// A typical household, used by `fathom sample` and the API sample endpoint
    pub fn sample() -> Self {
        Self {
            income: Income {
                salary: 4000.0,
                side_income: 500.0,
                other: 0.0,
            },
            expenses: Expenses {
                housing: 1200.0,
                utilities: 200.0,
                groceries: 400.0,
                transportation: 300.0,
                healthcare: 100.0,
                entertainment: 200.0,
                other: 200.0,
            },
            debts: DebtBalances {
                student_loan: 15_000.0,
                car_loan: 10_000.0,
                credit_card: 2000.0,
                mortgage: 200_000.0,
                other: 0.0,
            },
            debt_payments: DebtPayments {
                student_loan: 200.0,
                car_loan: 300.0,
                credit_card: 200.0,
                mortgage: 900.0,
                other: 0.0,
            },
            assets: Assets {
                emergency_fund: 10_000.0,
                investments: 50_000.0,
                retirement: 40_000.0,
                property: 250_000.0,
                other: 5000.0,
            },
            goal: Goal::default(),
        }
    }

    /// Check the engine's preconditions: every amount finite and non-negative,
    /// a positive goal amount, and a timeline of 1 to 30 years.
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("income.salary", self.income.salary),
            ("income.side_income", self.income.side_income),
            ("income.other", self.income.other),
            ("expenses.housing", self.expenses.housing),
            ("expenses.utilities", self.expenses.utilities),
            ("expenses.groceries", self.expenses.groceries),
            ("expenses.transportation", self.expenses.transportation),
            ("expenses.healthcare", self.expenses.healthcare),
            ("expenses.entertainment", self.expenses.entertainment),
            ("expenses.other", self.expenses.other),
            ("debts.student_loan", self.debts.student_loan),
            ("debts.car_loan", self.debts.car_loan),
            ("debts.credit_card", self.debts.credit_card),
            ("debts.mortgage", self.debts.mortgage),
            ("debts.other", self.debts.other),
            ("debt_payments.student_loan", self.debt_payments.student_loan),
            ("debt_payments.car_loan", self.debt_payments.car_loan),
            ("debt_payments.credit_card", self.debt_payments.credit_card),
            ("debt_payments.mortgage", self.debt_payments.mortgage),
            ("debt_payments.other", self.debt_payments.other),
            ("assets.emergency_fund", self.assets.emergency_fund),
            ("assets.investments", self.assets.investments),
            ("assets.retirement", self.assets.retirement),
            ("assets.property", self.assets.property),
            ("assets.other", self.assets.other),
        ];

        for (field, value) in amounts {
            check_non_negative(field, value)?;
        }

        if !self.goal.amount.is_finite() || self.goal.amount <= 0.0 {
            return Err(Error::Validation(format!(
                "goal.amount must be greater than zero (got {})",
                self.goal.amount
            )));
        }

        if !(1..=MAX_GOAL_TIMELINE_YEARS).contains(&self.goal.timeline_years) {
            return Err(Error::Validation(format!(
                "goal.timeline_years must be between 1 and {} (got {})",
                MAX_GOAL_TIMELINE_YEARS, self.goal.timeline_years
            )));
        }

        Ok(())
    }
}

/// Scenario controls for the retirement and what-if forecasts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParams {
    pub retirement_age: u32,
    pub current_age: u32,
    /// Expected annual return as a fraction (0.07 = 7%)
    pub annual_return: f64,
    /// Hypothetical extra monthly savings for the what-if scenario
    pub additional_savings: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            retirement_age: 65,
            current_age: 30,
            annual_return: 0.07,
            additional_savings: 200.0,
        }
    }
}

impl ForecastParams {
    pub fn validate(&self) -> Result<()> {
        if self.current_age >= self.retirement_age {
            return Err(Error::Validation(format!(
                "current_age ({}) must be less than retirement_age ({})",
                self.current_age, self.retirement_age
            )));
        }
        if self.retirement_age > MAX_RETIREMENT_AGE {
            return Err(Error::Validation(format!(
                "retirement_age must be at most {} (got {})",
                MAX_RETIREMENT_AGE, self.retirement_age
            )));
        }
        check_non_negative("annual_return", self.annual_return)?;
        check_non_negative("additional_savings", self.additional_savings)?;
        Ok(())
    }

    /// Years left until retirement (0 if the ages are inverted)
    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::Validation(format!(
            "{} must be a finite number",
            field
        )));
    }
    if value < 0.0 {
        return Err(Error::Validation(format!(
            "{} must not be negative (got {})",
            field, value
        )));
    }
    Ok(())
}

/// A snapshot file: the snapshot sections plus an optional `[forecast]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub snapshot: FinancialSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastParams>,
}

impl Scenario {
    /// Load a scenario from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            other => Err(Error::UnsupportedFormat(format!(
                "{} (expected .toml or .json, got {:?})",
                path.display(),
                other.unwrap_or("no extension")
            ))),
        }
    }
}

// ========== Output Models ==========

/// Monthly totals and net figures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedTotals {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_debt_payments: f64,
    /// Income minus expenses minus debt payments (may be negative)
    pub monthly_savings: f64,
    pub total_debt: f64,
    pub total_assets: f64,
    pub net_worth: f64,
}

/// Three-level health classification, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Danger,
    Warning,
    Good,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Danger => "danger",
            HealthStatus::Warning => "warning",
            HealthStatus::Good => "good",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "danger" => Ok(HealthStatus::Danger),
            "warning" => Ok(HealthStatus::Warning),
            "good" => Ok(HealthStatus::Good),
            _ => Err(format!("Unknown health status: {}", s)),
        }
    }
}

/// A metric value with its classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub value: f64,
    pub status: HealthStatus,
}

/// Composite score broken down by component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    /// Sum of the components, 0-100
    pub total: f64,
    /// Out of 25
    pub savings: f64,
    /// Out of 25
    pub debt: f64,
    /// Out of 25
    pub emergency: f64,
    /// Out of 15
    pub housing: f64,
    /// Out of 10
    pub net_worth: f64,
    /// Gauge zone the total falls in
    pub band: HealthStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    /// Percent of income saved
    pub savings_rate: MetricReading,
    /// Percent of income going to debt payments
    pub debt_to_income: MetricReading,
    /// Percent of income going to housing
    pub housing_to_income: MetricReading,
    /// Months of expenses covered by the emergency fund
    pub emergency_months: MetricReading,
    /// Total debt as percent of total assets
    pub debt_to_asset: MetricReading,
    pub score: HealthScore,
}

/// One point on the goal projection chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub projected: f64,
    pub goal: f64,
}

/// Extra savings needed to hit the goal within its timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsShortfall {
    pub required_monthly: f64,
    /// Required minus current monthly savings
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalProjection {
    /// Current savings are zero or negative; the goal is never reached
    Unreachable,
    Projected {
        years_to_goal: f64,
        series: Vec<ProjectionPoint>,
        within_timeline: bool,
        shortfall: Option<SavingsShortfall>,
        /// The series was cut at the configured maximum horizon
        truncated: bool,
    },
}

impl GoalProjection {
    pub fn years_to_goal(&self) -> Option<f64> {
        match self {
            GoalProjection::Unreachable => None,
            GoalProjection::Projected { years_to_goal, .. } => Some(*years_to_goal),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetirementStatus {
    /// Projected income replaces less than the target share of current income
    Warning,
    OnTrack,
}

impl RetirementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetirementStatus::Warning => "warning",
            RetirementStatus::OnTrack => "on_track",
        }
    }
}

impl fmt::Display for RetirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementProjection {
    pub retirement_age: u32,
    pub years_to_retirement: u32,
    /// Current retirement balance grown to retirement age
    pub balance_future_value: f64,
    /// Future value of the yearly contribution stream
    pub contributions_future_value: f64,
    pub total_savings: f64,
    /// Monthly income under the withdrawal rule
    pub monthly_income: f64,
    /// Monthly retirement income as percent of current monthly income
    pub replacement_ratio: f64,
    /// `replacement_ratio / 100` clamped to 0-1, for progress bars
    pub replacement_progress: f64,
    pub status: RetirementStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfScenario {
    pub additional_savings: f64,
    pub new_monthly_savings: f64,
    pub new_contributions_future_value: f64,
    pub new_total_savings: f64,
    pub new_monthly_income: f64,
    pub income_increase: f64,
    /// Percent increase over baseline (0 when the baseline is not positive)
    pub income_increase_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub goal: GoalProjection,
    pub retirement: RetirementProjection,
    pub what_if: WhatIfScenario,
}

/// Current vs ideal share of income for one 50/30/20 bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: String,
    pub current: f64,
    pub ideal: f64,
}

/// A labelled slice of the monthly outflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSlice {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    pub needs_percent: f64,
    pub wants_percent: f64,
    pub savings_debt_percent: f64,
    pub comparison: Vec<BudgetComparison>,
    pub suggestions: Vec<String>,
    /// Non-zero expense categories plus debt payments
    pub breakdown: Vec<ExpenseSlice>,
    pub highest_category: String,
}

/// One bar of the monthly cash-flow chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowBar {
    pub label: String,
    pub amount: f64,
}

/// Everything a dashboard needs, computed in one pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialReport {
    pub generated_at: DateTime<Utc>,
    pub goal_label: String,
    pub totals: DerivedTotals,
    pub health: HealthMetrics,
    pub recommendations: Vec<String>,
    pub budget: BudgetAnalysis,
    pub forecast: ForecastResult,
    pub cash_flow: Vec<CashFlowBar>,
    /// Net worth relative to twice total assets, clamped to 0-1
    pub net_worth_progress: f64,
}
