use serde::{Deserialize, Serialize};

use super::allocation::Distribution;
use super::budget::ExpenseCategory;

/// Categorical budget health derived from the savings rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialHealth {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl FinancialHealth {
    /// Band thresholds: ≥30 excellent, ≥20 good, ≥10 warning, else critical.
    pub fn from_savings_rate(savings_rate: f64) -> Self {
        if savings_rate >= 30.0 {
            FinancialHealth::Excellent
        } else if savings_rate >= 20.0 {
            FinancialHealth::Good
        } else if savings_rate >= 10.0 {
            FinancialHealth::Warning
        } else {
            FinancialHealth::Critical
        }
    }
}

impl std::fmt::Display for FinancialHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinancialHealth::Excellent => write!(f, "excellent"),
            FinancialHealth::Good => write!(f, "good"),
            FinancialHealth::Warning => write!(f, "warning"),
            FinancialHealth::Critical => write!(f, "critical"),
        }
    }
}

/// One slice of the monthly expense breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryExpense {
    pub category: ExpenseCategory,

    /// Display label for `category`
    pub label: String,

    /// Monthly amount attributed to this category
    pub amount: f64,

    /// Share of total monthly expenses (0–100)
    pub percentage: f64,

    /// Hex chart color for `category`
    pub color: String,
}

/// How much to invest, and how, given the current budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSuggestion {
    /// Emergency-fund target: monthly expenses × `emergency_fund_months`
    pub emergency_fund: f64,
    pub emergency_fund_months: u32,
    pub investment_amount: f64,
    pub investment_percentage: u8,
    pub distribution: Distribution,
    pub tips: Vec<String>,
}

/// Derived, never-persisted view over a `FinancialData` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalysis {
    pub total_fixed_expenses: f64,

    /// Averaged monthly variable spending over the trailing window
    pub total_variable_expenses: f64,

    pub total_expenses: f64,
    pub remaining_balance: f64,

    /// Remaining balance as a percentage of income. May be negative; 0 when income is 0.
    pub savings_rate: f64,

    /// Sorted by amount, largest first
    pub expenses_by_category: Vec<CategoryExpense>,

    pub financial_health: FinancialHealth,
    pub recommendations: Vec<String>,
    pub investment_suggestion: InvestmentSuggestion,
}
