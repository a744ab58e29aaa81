use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categories a recurring (fixed) expense can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedCategory {
    Housing,
    Transport,
    Health,
    Education,
    Insurance,
    Other,
}

/// Categories a one-off (variable) expense can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableCategory {
    Food,
    Entertainment,
    Shopping,
    Health,
    Transport,
    Other,
}

/// Union of both category sets, used by the category breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Housing,
    Transport,
    Health,
    Education,
    Insurance,
    Food,
    Entertainment,
    Shopping,
    Other,
}

impl ExpenseCategory {
    /// Display label (pt-BR).
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "Moradia",
            ExpenseCategory::Transport => "Transporte",
            ExpenseCategory::Health => "Saúde",
            ExpenseCategory::Education => "Educação",
            ExpenseCategory::Insurance => "Seguros",
            ExpenseCategory::Food => "Alimentação",
            ExpenseCategory::Entertainment => "Lazer",
            ExpenseCategory::Shopping => "Compras",
            ExpenseCategory::Other => "Outros",
        }
    }

    /// Chart color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "#3b82f6",
            ExpenseCategory::Transport => "#10b981",
            ExpenseCategory::Health => "#ef4444",
            ExpenseCategory::Education => "#8b5cf6",
            ExpenseCategory::Insurance => "#f59e0b",
            ExpenseCategory::Food => "#ec4899",
            ExpenseCategory::Entertainment => "#06b6d4",
            ExpenseCategory::Shopping => "#f97316",
            ExpenseCategory::Other => "#6b7280",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<FixedCategory> for ExpenseCategory {
    fn from(c: FixedCategory) -> Self {
        match c {
            FixedCategory::Housing => ExpenseCategory::Housing,
            FixedCategory::Transport => ExpenseCategory::Transport,
            FixedCategory::Health => ExpenseCategory::Health,
            FixedCategory::Education => ExpenseCategory::Education,
            FixedCategory::Insurance => ExpenseCategory::Insurance,
            FixedCategory::Other => ExpenseCategory::Other,
        }
    }
}

impl From<VariableCategory> for ExpenseCategory {
    fn from(c: VariableCategory) -> Self {
        match c {
            VariableCategory::Food => ExpenseCategory::Food,
            VariableCategory::Entertainment => ExpenseCategory::Entertainment,
            VariableCategory::Shopping => ExpenseCategory::Shopping,
            VariableCategory::Health => ExpenseCategory::Health,
            VariableCategory::Transport => ExpenseCategory::Transport,
            VariableCategory::Other => ExpenseCategory::Other,
        }
    }
}

/// A recurring monthly bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Day of month the bill is due (1–31)
    pub due_date: u8,
    pub category: FixedCategory,
}

impl FixedExpense {
    pub fn new(name: impl Into<String>, amount: f64, due_date: u8, category: FixedCategory) -> Self {
        Self {
            id: format!("fixed-{}", Uuid::new_v4()),
            name: name.into(),
            amount,
            due_date,
            category,
        }
    }
}

/// A one-off expense booked against a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableExpense {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub category: VariableCategory,
    /// Calendar month (1–12)
    pub month: u32,
    pub year: i32,
}

impl VariableExpense {
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        category: VariableCategory,
        month: u32,
        year: i32,
    ) -> Self {
        Self {
            id: format!("variable-{}", Uuid::new_v4()),
            name: name.into(),
            amount,
            category,
            month,
            year,
        }
    }
}

/// The single budget record kept per user.
/// Persisted in full after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    /// Day of month the salary is paid (1–31)
    pub salary_date: u8,
    pub monthly_income: f64,
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,
    #[serde(default)]
    pub variable_expenses: Vec<VariableExpense>,
}

impl Default for FinancialData {
    fn default() -> Self {
        Self {
            salary_date: 5,
            monthly_income: 0.0,
            fixed_expenses: Vec::new(),
            variable_expenses: Vec::new(),
        }
    }
}
