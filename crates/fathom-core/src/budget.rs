//! Budget Analyzer - 50/30/20 rule comparison and expense breakdown

use crate::health::guarded_ratio;
use crate::models::{BudgetAnalysis, BudgetComparison, DerivedTotals, ExpenseSlice, FinancialSnapshot};

const IDEAL_NEEDS: f64 = 50.0;
const IDEAL_WANTS: f64 = 30.0;
const IDEAL_SAVINGS_DEBT: f64 = 20.0;

/// Monthly outflow by category, in display order (debt payments last)
pub fn expense_categories(
    totals: &DerivedTotals,
    snapshot: &FinancialSnapshot,
) -> Vec<ExpenseSlice> {
    let e = &snapshot.expenses;
    [
        ("Housing", e.housing),
        ("Utilities", e.utilities),
        ("Groceries", e.groceries),
        ("Transportation", e.transportation),
        ("Healthcare", e.healthcare),
        ("Entertainment", e.entertainment),
        ("Other Expenses", e.other),
        ("Debt Payments", totals.monthly_debt_payments),
    ]
    .into_iter()
    .map(|(label, amount)| ExpenseSlice {
        label: label.to_string(),
        amount,
    })
    .collect()
}

/// Compare spending to the 50/30/20 rule and suggest adjustments
pub fn analyze_budget(totals: &DerivedTotals, snapshot: &FinancialSnapshot) -> BudgetAnalysis {
    let e = &snapshot.expenses;
    let income = totals.monthly_income;

    let needs = e.housing + e.utilities + e.groceries + e.transportation + e.healthcare;
    let needs_percent = guarded_ratio(needs, income, 100.0);
    let wants_percent = guarded_ratio(e.entertainment, income, 100.0);
    let savings_debt_percent = guarded_ratio(
        totals.monthly_savings + totals.monthly_debt_payments,
        income,
        100.0,
    );

    let comparison = vec![
        BudgetComparison {
            category: "Needs".to_string(),
            current: needs_percent,
            ideal: IDEAL_NEEDS,
        },
        BudgetComparison {
            category: "Wants".to_string(),
            current: wants_percent,
            ideal: IDEAL_WANTS,
        },
        BudgetComparison {
            category: "Savings & Debt".to_string(),
            current: savings_debt_percent,
            ideal: IDEAL_SAVINGS_DEBT,
        },
    ];

    let categories = expense_categories(totals, snapshot);

    // First category wins ties
    let highest_category = categories
        .iter()
        .fold(None::<&ExpenseSlice>, |best, slice| match best {
            Some(b) if b.amount >= slice.amount => Some(b),
            _ => Some(slice),
        })
        .map(|slice| slice.label.clone())
        .unwrap_or_default();

    let mut suggestions = Vec::new();
    if needs_percent > IDEAL_NEEDS {
        suggestions.push(format!(
            "Your essential expenses (needs) are {:.1}% of income, which is above the recommended 50%. \
             Consider finding ways to reduce housing, transportation, or utility costs.",
            needs_percent
        ));
    }
    if wants_percent > IDEAL_WANTS {
        suggestions.push(format!(
            "Your discretionary spending (wants) is {:.1}% of income, above the recommended 30%. \
             Try cutting back on entertainment and non-essential purchases.",
            wants_percent
        ));
    }
    if savings_debt_percent < IDEAL_SAVINGS_DEBT {
        suggestions.push(format!(
            "You're only allocating {:.1}% to savings and debt repayment, below the recommended 20%. \
             Increase this allocation to build long-term wealth.",
            savings_debt_percent
        ));
    }
    suggestions.push(format!(
        "Your highest expense category is {}. Look for ways to optimize this area of your budget.",
        highest_category
    ));

    let breakdown = categories
        .into_iter()
        .filter(|slice| slice.amount > 0.0)
        .collect();

    BudgetAnalysis {
        needs_percent,
        wants_percent,
        savings_debt_percent,
        comparison,
        suggestions,
        breakdown,
        highest_category,
    }
}
