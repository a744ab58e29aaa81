use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// What the investor wants out of their money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentGoal {
    Conservative,
    Moderate,
    Aggressive,
}

impl std::fmt::Display for InvestmentGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentGoal::Conservative => write!(f, "conservative"),
            InvestmentGoal::Moderate => write!(f, "moderate"),
            InvestmentGoal::Aggressive => write!(f, "aggressive"),
        }
    }
}

/// How long the money can stay invested.
/// Short is under 2 years, medium 2–5 years, long over 5 years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestmentHorizon {
    Short,
    Medium,
    Long,
}

impl std::fmt::Display for InvestmentHorizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvestmentHorizon::Short => write!(f, "short"),
            InvestmentHorizon::Medium => write!(f, "medium"),
            InvestmentHorizon::Long => write!(f, "long"),
        }
    }
}

/// Answers collected by the onboarding questionnaire.
///
/// Created once when onboarding completes and replaced only by running
/// onboarding again. Removed on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,

    /// Age in years (18–100 once validated)
    pub age: u32,

    /// Net monthly income in BRL
    pub monthly_income: f64,

    pub investment_goal: InvestmentGoal,

    pub investment_horizon: InvestmentHorizon,

    /// Self-reported risk tolerance on a 1–10 scale
    pub risk_tolerance: u8,

    pub has_emergency_fund: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_investments: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_debts: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependents: Option<u32>,
}

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;

impl UserProfile {
    pub fn new(
        name: impl Into<String>,
        age: u32,
        monthly_income: f64,
        investment_goal: InvestmentGoal,
        investment_horizon: InvestmentHorizon,
        risk_tolerance: u8,
        has_emergency_fund: bool,
    ) -> Self {
        Self {
            name: name.into(),
            age,
            monthly_income,
            investment_goal,
            investment_horizon,
            risk_tolerance,
            has_emergency_fund,
            has_investments: None,
            has_debts: None,
            dependents: None,
        }
    }

    /// Onboarding form rules. A profile that fails here must not be saved.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationError("Name must not be empty".into()));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(CoreError::ValidationError(format!(
                "Age {} is outside the accepted range {MIN_AGE}..={MAX_AGE}",
                self.age
            )));
        }
        if !self.monthly_income.is_finite() || self.monthly_income <= 0.0 {
            return Err(CoreError::ValidationError(
                "Monthly income must be a positive amount".into(),
            ));
        }
        if !(1..=10).contains(&self.risk_tolerance) {
            return Err(CoreError::ValidationError(format!(
                "Risk tolerance {} must be between 1 and 10",
                self.risk_tolerance
            )));
        }
        Ok(())
    }
}

/// Investor category shown at the end of onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvestorProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl InvestorProfile {
    pub fn label(&self) -> &'static str {
        match self {
            InvestorProfile::Conservative => "Conservador",
            InvestorProfile::Moderate => "Moderado",
            InvestorProfile::Aggressive => "Agressivo",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            InvestorProfile::Conservative => {
                "Você prioriza segurança e estabilidade. Prefere investimentos de baixo risco \
                 com retornos previsíveis, como renda fixa e títulos públicos. Ideal para quem \
                 está construindo sua base financeira."
            }
            InvestorProfile::Moderate => {
                "Você busca equilíbrio entre segurança e crescimento. Aceita alguma volatilidade \
                 em busca de melhores retornos, diversificando entre renda fixa e variável. \
                 Perfil ideal para objetivos de médio prazo."
            }
            InvestorProfile::Aggressive => {
                "Você está confortável com alta volatilidade em busca de retornos superiores. \
                 Foca em ações, fundos de crescimento e até criptomoedas. Ideal para quem tem \
                 horizonte longo e reservas sólidas."
            }
        }
    }
}

impl std::fmt::Display for InvestorProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
