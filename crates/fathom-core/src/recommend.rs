//! Recommendation Generator
//!
//! Rule-based advice. Rules run in registration order and each emits at most
//! one message, picking the most severe branch that applies. When no rule
//! fires, a single fallback message is returned.
//!
//! Cutoffs come from the same `Thresholds` used for classification, so a
//! config override moves advice and status together. Comparisons are strict:
//! a value exactly at a cutoff does not trigger the stricter message.
//!
//! ## Built-in Rules (in order, default cutoffs)
//!
//! - **Savings** - savings rate below 10% / 20%
//! - **Debt** - debt-to-income above 36% / 28%
//! - **Emergency fund** - under 3 / 6 months of expenses
//! - **Housing** - housing above 33% of income
//! - **Credit card** - any credit card balance

use crate::config::Thresholds;
use crate::health::ThresholdScale;
use crate::models::{FinancialSnapshot, HealthMetrics};

pub const DEBT_CRITICAL: &str =
    "Your debt payments are too high relative to income. Focus on paying down high-interest debt.";
pub const HOUSING_HIGH: &str =
    "Your housing costs are high relative to your income. Consider ways to reduce housing expenses.";
pub const CREDIT_CARD: &str =
    "Prioritize paying off high-interest credit card debt as quickly as possible.";
pub const ALL_CLEAR: &str =
    "Great job! Your financial health is strong. Consider increasing investments for long-term wealth.";

pub fn savings_critical(floor: f64) -> String {
    format!(
        "Increase your savings rate to at least {}% by cutting non-essential expenses.",
        floor
    )
}

pub fn savings_improve(target: f64) -> String {
    format!(
        "Consider boosting your savings rate to {}% to build wealth faster.",
        target
    )
}

pub fn debt_improve(target: f64) -> String {
    format!(
        "Work on reducing your debt-to-income ratio to less than {}% for better financial health.",
        target
    )
}

pub fn emergency_critical(floor: f64) -> String {
    format!(
        "Build your emergency fund to cover at least {} months of expenses.",
        floor
    )
}

pub fn emergency_improve(target: f64) -> String {
    format!(
        "Continue building your emergency fund to reach a {}-month safety net.",
        target
    )
}

/// A single advice rule
pub trait RecommendationRule: Send + Sync {
    /// Short identifier used in logs
    fn id(&self) -> &'static str;

    /// The advice for this snapshot, if any
    fn evaluate(&self, health: &HealthMetrics, snapshot: &FinancialSnapshot) -> Option<String>;
}

/// Below the lower savings cutoff is critical, below the upper one needs work
pub struct SavingsRule {
    pub scale: ThresholdScale,
}

impl RecommendationRule for SavingsRule {
    fn id(&self) -> &'static str {
        "savings"
    }

    fn evaluate(&self, health: &HealthMetrics, _snapshot: &FinancialSnapshot) -> Option<String> {
        let [floor, target] = self.scale.cutoffs;
        let rate = health.savings_rate.value;
        if rate < floor {
            Some(savings_critical(floor))
        } else if rate < target {
            Some(savings_improve(target))
        } else {
            None
        }
    }
}

/// Above the upper debt-to-income cutoff is critical, above the lower one needs work
pub struct DebtRule {
    pub scale: ThresholdScale,
}

impl RecommendationRule for DebtRule {
    fn id(&self) -> &'static str {
        "debt"
    }

    fn evaluate(&self, health: &HealthMetrics, _snapshot: &FinancialSnapshot) -> Option<String> {
        let [target, ceiling] = self.scale.cutoffs;
        let dti = health.debt_to_income.value;
        if dti > ceiling {
            Some(DEBT_CRITICAL.to_string())
        } else if dti > target {
            Some(debt_improve(target))
        } else {
            None
        }
    }
}

pub struct EmergencyFundRule {
    pub scale: ThresholdScale,
}

impl RecommendationRule for EmergencyFundRule {
    fn id(&self) -> &'static str {
        "emergency_fund"
    }

    fn evaluate(&self, health: &HealthMetrics, _snapshot: &FinancialSnapshot) -> Option<String> {
        let [floor, target] = self.scale.cutoffs;
        let months = health.emergency_months.value;
        if months < floor {
            Some(emergency_critical(floor))
        } else if months < target {
            Some(emergency_improve(target))
        } else {
            None
        }
    }
}

/// Fires above the upper housing-to-income cutoff
pub struct HousingRule {
    pub scale: ThresholdScale,
}

impl RecommendationRule for HousingRule {
    fn id(&self) -> &'static str {
        "housing"
    }

    fn evaluate(&self, health: &HealthMetrics, _snapshot: &FinancialSnapshot) -> Option<String> {
        let ceiling = self.scale.cutoffs[1];
        (health.housing_to_income.value > ceiling).then(|| HOUSING_HIGH.to_string())
    }
}

pub struct CreditCardRule;

impl RecommendationRule for CreditCardRule {
    fn id(&self) -> &'static str {
        "credit_card"
    }

    fn evaluate(&self, _health: &HealthMetrics, snapshot: &FinancialSnapshot) -> Option<String> {
        (snapshot.debts.credit_card > 0.0).then(|| CREDIT_CARD.to_string())
    }
}

/// Ordered set of rules plus the fallback message
pub struct RecommendationEngine {
    rules: Vec<Box<dyn RecommendationRule>>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Create an engine with the built-in rules and default cutoffs
    pub fn new() -> Self {
        Self::with_thresholds(&Thresholds::default())
    }

    /// Create an engine with the built-in rules in their fixed order,
    /// using the same cutoffs as metric classification
    pub fn with_thresholds(thresholds: &Thresholds) -> Self {
        let mut engine = Self::empty();

        engine.register(Box::new(SavingsRule {
            scale: thresholds.savings_rate,
        }));
        engine.register(Box::new(DebtRule {
            scale: thresholds.debt_to_income,
        }));
        engine.register(Box::new(EmergencyFundRule {
            scale: thresholds.emergency_months,
        }));
        engine.register(Box::new(HousingRule {
            scale: thresholds.housing_to_income,
        }));
        engine.register(Box::new(CreditCardRule));

        engine
    }

    /// Create an engine with no rules (always yields the fallback)
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    /// Append a rule; it runs after every rule registered before it
    pub fn register(&mut self, rule: Box<dyn RecommendationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Run every rule in order, dropping repeated messages
    pub fn recommend(&self, health: &HealthMetrics, snapshot: &FinancialSnapshot) -> Vec<String> {
        let mut recommendations: Vec<String> = Vec::new();

        for rule in &self.rules {
            if let Some(message) = rule.evaluate(health, snapshot) {
                tracing::trace!(rule = rule.id(), "Recommendation rule fired");
                if !recommendations.contains(&message) {
                    recommendations.push(message);
                }
            }
        }

        if recommendations.is_empty() {
            recommendations.push(ALL_CLEAR.to_string());
        }

        recommendations
    }
}

/// Recommendations from the built-in rules with default cutoffs
pub fn recommend(health: &HealthMetrics, snapshot: &FinancialSnapshot) -> Vec<String> {
    RecommendationEngine::new().recommend(health, snapshot)
}

/// Recommendations using the configured cutoffs
pub fn recommend_with(
    health: &HealthMetrics,
    snapshot: &FinancialSnapshot,
    thresholds: &Thresholds,
) -> Vec<String> {
    RecommendationEngine::with_thresholds(thresholds).recommend(health, snapshot)
}
