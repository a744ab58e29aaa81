use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::allocation::AllocationResult;
use super::market::{MarketTrend, NewsItem, Opportunity};
use super::order::Order;
use super::profile::{InvestorProfile, UserProfile};

/// Everything the dashboard screen renders for one profile.
///
/// The core builds these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub profile: UserProfile,
    pub investor_profile: InvestorProfile,
    pub allocation: AllocationResult,
    pub trends: Vec<MarketTrend>,
    pub orders: Vec<Order>,
    pub news: Vec<NewsItem>,
    pub opportunities: Vec<Opportunity>,

    /// When `news` was last generated
    pub generated_at: DateTime<Utc>,
}

impl Dashboard {
    /// `true` once the news catalog is at least `interval` old.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        now - self.generated_at >= interval
    }
}

/// Which top-level screen the UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// No active subscription while one is required
    Paywall,
    /// No saved profile yet
    Onboarding,
    Dashboard,
}
