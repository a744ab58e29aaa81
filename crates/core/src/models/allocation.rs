use serde::{Deserialize, Serialize};

/// The three asset classes a suggested contribution is split across.
/// Declaration order is the order orders are generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetClass {
    FixedIncome,
    Stocks,
    Crypto,
}

impl AssetClass {
    pub const ALL: [AssetClass; 3] = [AssetClass::FixedIncome, AssetClass::Stocks, AssetClass::Crypto];
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetClass::FixedIncome => write!(f, "Renda Fixa"),
            AssetClass::Stocks => write!(f, "Ações"),
            AssetClass::Crypto => write!(f, "Cripto"),
        }
    }
}

/// Percentage split plus the suggested monthly contribution.
///
/// Derived from a `UserProfile` and never persisted on its own.
/// `fixed_income + stocks + crypto == 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub fixed_income: u8,
    pub stocks: u8,
    pub crypto: u8,

    /// Suggested monthly contribution in BRL, rounded to a whole amount
    pub suggested_amount: f64,
}

impl AllocationResult {
    pub fn percentage(&self, class: AssetClass) -> u8 {
        match class {
            AssetClass::FixedIncome => self.fixed_income,
            AssetClass::Stocks => self.stocks,
            AssetClass::Crypto => self.crypto,
        }
    }

    pub fn total_percentage(&self) -> u32 {
        u32::from(self.fixed_income) + u32::from(self.stocks) + u32::from(self.crypto)
    }
}

/// Three-way split used by the budget engine's investment suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub fixed_income: u8,
    pub stocks: u8,
    pub crypto: u8,
}

impl Distribution {
    pub const fn new(fixed_income: u8, stocks: u8, crypto: u8) -> Self {
        Self {
            fixed_income,
            stocks,
            crypto,
        }
    }
}
