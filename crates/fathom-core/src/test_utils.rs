//! Test utilities for fathom-core
//!
//! Snapshot builders shared by unit tests here and by the CLI and server
//! test suites (via the `test-utils` feature).

use crate::models::{FinancialSnapshot, Goal, GoalType};

/// A snapshot with only the monthly flows set
///
/// Income goes into salary, expenses into "other", payments into "other".
pub fn snapshot_with_flows(income: f64, expenses: f64, payments: f64) -> FinancialSnapshot {
    let mut snapshot = FinancialSnapshot::default();
    snapshot.income.salary = income;
    snapshot.expenses.other = expenses;
    snapshot.debt_payments.other = payments;
    snapshot
}

/// Every metric in the good tier and no credit card balance
///
/// Income 10000, housing 2000, debt payments 1000, savings 6000,
/// emergency fund 24000 (8 months), debt 50000 against 500000 in assets.
pub fn all_green_snapshot() -> FinancialSnapshot {
    let mut snapshot = snapshot_with_flows(10_000.0, 1000.0, 1000.0);
    snapshot.expenses.housing = 2000.0;
    snapshot.debts.mortgage = 50_000.0;
    snapshot.assets.emergency_fund = 24_000.0;
    snapshot.assets.investments = 476_000.0;
    snapshot
}

/// Every metric in the danger tier with a credit card balance
pub fn all_red_snapshot() -> FinancialSnapshot {
    let mut snapshot = snapshot_with_flows(3000.0, 500.0, 1500.0);
    snapshot.expenses.housing = 1200.0;
    snapshot.debts.credit_card = 8000.0;
    snapshot.debts.student_loan = 40_000.0;
    snapshot.assets.emergency_fund = 1000.0;
    snapshot
}

/// The sample snapshot with a different goal
pub fn sample_with_goal(kind: GoalType, amount: f64, timeline_years: u32) -> FinancialSnapshot {
    FinancialSnapshot {
        goal: Goal {
            kind,
            amount,
            timeline_years,
        },
        ..FinancialSnapshot::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::config::Thresholds;
    use crate::health::compute_health;
    use crate::models::HealthStatus;

    #[test]
    fn test_all_green_is_green() {
        let snapshot = all_green_snapshot();
        snapshot.validate().unwrap();
        let health = compute_health(&aggregate(&snapshot), &snapshot, &Thresholds::default());

        for reading in [
            health.savings_rate,
            health.debt_to_income,
            health.housing_to_income,
            health.emergency_months,
            health.debt_to_asset,
        ] {
            assert_eq!(reading.status, HealthStatus::Good, "{:?}", reading);
        }
    }

    #[test]
    fn test_all_red_is_red() {
        let snapshot = all_red_snapshot();
        snapshot.validate().unwrap();
        let health = compute_health(&aggregate(&snapshot), &snapshot, &Thresholds::default());

        for reading in [
            health.savings_rate,
            health.debt_to_income,
            health.housing_to_income,
            health.emergency_months,
            health.debt_to_asset,
        ] {
            assert_eq!(reading.status, HealthStatus::Danger, "{:?}", reading);
        }
    }
}
