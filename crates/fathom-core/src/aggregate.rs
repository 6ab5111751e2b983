//! Aggregator: raw snapshot fields to monthly totals and net figures
//!
//! Plain unweighted sums. The snapshot is expected to be validated already;
//! negative values are summed as-is.

use crate::models::{Assets, DebtBalances, DebtPayments, DerivedTotals, Expenses, FinancialSnapshot, Income};

impl Income {
    pub fn total(&self) -> f64 {
        self.salary + self.side_income + self.other
    }
}

impl Expenses {
    pub fn total(&self) -> f64 {
        self.housing
            + self.utilities
            + self.groceries
            + self.transportation
            + self.healthcare
            + self.entertainment
            + self.other
    }
}

impl DebtBalances {
    pub fn total(&self) -> f64 {
        self.student_loan + self.car_loan + self.credit_card + self.mortgage + self.other
    }
}

impl DebtPayments {
    pub fn total(&self) -> f64 {
        self.student_loan + self.car_loan + self.credit_card + self.mortgage + self.other
    }
}

impl Assets {
    pub fn total(&self) -> f64 {
        self.emergency_fund + self.investments + self.retirement + self.property + self.other
    }
}

/// Sum the snapshot into monthly totals, net savings and net worth
pub fn aggregate(snapshot: &FinancialSnapshot) -> DerivedTotals {
    let monthly_income = snapshot.income.total();
    let monthly_expenses = snapshot.expenses.total();
    let monthly_debt_payments = snapshot.debt_payments.total();
    let total_debt = snapshot.debts.total();
    let total_assets = snapshot.assets.total();

    DerivedTotals {
        monthly_income,
        monthly_expenses,
        monthly_debt_payments,
        monthly_savings: monthly_income - monthly_expenses - monthly_debt_payments,
        total_debt,
        total_assets,
        net_worth: total_assets - total_debt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_sample() {
        let totals = aggregate(&FinancialSnapshot::sample());

        assert_eq!(totals.monthly_income, 4500.0);
        assert_eq!(totals.monthly_expenses, 2600.0);
        assert_eq!(totals.monthly_debt_payments, 1600.0);
        assert_eq!(totals.monthly_savings, 300.0);
        assert_eq!(totals.total_debt, 227_000.0);
        assert_eq!(totals.total_assets, 355_000.0);
        assert_eq!(totals.net_worth, 128_000.0);
    }

    #[test]
    fn test_aggregate_empty_snapshot() {
        let totals = aggregate(&FinancialSnapshot::default());
        assert_eq!(totals, DerivedTotals::default());
    }

    #[test]
    fn test_negative_savings_allowed() {
        let mut snapshot = FinancialSnapshot::default();
        snapshot.income.salary = 1000.0;
        snapshot.expenses.housing = 1500.0;

        let totals = aggregate(&snapshot);
        assert_eq!(totals.monthly_savings, -500.0);
    }

    #[test]
    fn test_negative_inputs_sum_without_special_casing() {
        let mut snapshot = FinancialSnapshot::default();
        snapshot.assets.investments = 100.0;
        snapshot.assets.other = -40.0;

        assert_eq!(aggregate(&snapshot).total_assets, 60.0);
    }
}
