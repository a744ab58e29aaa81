use crate::models::allocation::AllocationResult;
use crate::models::profile::{InvestmentGoal, InvestmentHorizon, InvestorProfile, UserProfile};

/// Ceiling on the equity share, applied before any crypto carve-out.
pub const MAX_STOCKS_PCT: i64 = 80;

/// Ceiling on the crypto share.
pub const MAX_CRYPTO_PCT: i64 = 15;

/// Minimum risk tolerance for any crypto allocation.
pub const CRYPTO_MIN_RISK_TOLERANCE: u8 = 7;

/// Round to the nearest whole number, ties upward.
///
/// Inputs are non-negative, where `f64::round` (ties away from zero) is
/// exactly half-up, including just below .5 and above 2^52.
pub fn round_half_up(value: f64) -> f64 {
    value.round()
}

/// Turns an onboarding profile into a three-way allocation.
///
/// Pure computation over a profile. Validation happens before this runs.
pub struct AllocationService;

impl AllocationService {
    pub fn new() -> Self {
        Self
    }

    /// Compute the fixed-income / stocks / crypto split and the suggested
    /// monthly contribution.
    ///
    /// Rules:
    /// - variable baseline is `100 - age`, floored at 20
    /// - baseline is scaled by goal (0.6 / 1.0 / 1.4) and horizon (0.7 / 1.0 / 1.3)
    /// - stocks are capped at 80 before crypto is carved out of them
    /// - crypto is 15% of stocks (max 15) for non-conservative goals with
    ///   risk tolerance of 7 or more
    /// - fixed income takes the remainder
    pub fn calculate_allocation(&self, profile: &UserProfile) -> AllocationResult {
        let base_variable = (100 - i64::from(profile.age)).max(20);

        let scaled = base_variable as f64
            * Self::risk_multiplier(profile.investment_goal)
            * Self::horizon_multiplier(profile.investment_horizon);

        let mut stocks = (round_half_up(scaled) as i64).clamp(0, MAX_STOCKS_PCT);

        let mut crypto = 0;
        if profile.risk_tolerance >= CRYPTO_MIN_RISK_TOLERANCE
            && profile.investment_goal != InvestmentGoal::Conservative
        {
            crypto = (round_half_up(stocks as f64 * 0.15) as i64).min(MAX_CRYPTO_PCT);
            stocks -= crypto;
        }

        let fixed_income = 100 - stocks - crypto;

        let investment_rate = if profile.has_emergency_fund { 0.2 } else { 0.1 };
        let suggested_amount = round_half_up(profile.monthly_income * investment_rate).max(0.0);

        AllocationResult {
            fixed_income: fixed_income as u8,
            stocks: stocks as u8,
            crypto: crypto as u8,
            suggested_amount,
        }
    }

    /// Classify the investor for the onboarding summary.
    pub fn classify_investor(&self, profile: &UserProfile) -> InvestorProfile {
        let risk = profile.risk_tolerance;
        if profile.investment_goal == InvestmentGoal::Conservative
            || risk <= 3
            || !profile.has_emergency_fund
        {
            InvestorProfile::Conservative
        } else if profile.investment_goal == InvestmentGoal::Moderate || (4..=7).contains(&risk) {
            InvestorProfile::Moderate
        } else {
            InvestorProfile::Aggressive
        }
    }

    fn risk_multiplier(goal: InvestmentGoal) -> f64 {
        match goal {
            InvestmentGoal::Conservative => 0.6,
            InvestmentGoal::Moderate => 1.0,
            InvestmentGoal::Aggressive => 1.4,
        }
    }

    fn horizon_multiplier(horizon: InvestmentHorizon) -> f64 {
        match horizon {
            InvestmentHorizon::Short => 0.7,
            InvestmentHorizon::Medium => 1.0,
            InvestmentHorizon::Long => 1.3,
        }
    }
}

impl Default for AllocationService {
    fn default() -> Self {
        Self::new()
    }
}
