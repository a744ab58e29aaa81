use chrono::{DateTime, Utc};

use crate::models::market::{MarketTrend, NewsItem, Opportunity};

/// Source of market narrative shown on the dashboard.
///
/// The bundled `StaticMarketFeed` serves fixed catalogs. A live-analysis
/// source can replace it without touching the rest of the codebase.
pub trait MarketFeed {
    /// Human-readable name of this feed (for logs).
    fn name(&self) -> &str;

    /// Per-segment trend narratives.
    fn trends(&self) -> Vec<MarketTrend>;

    /// Headlines, timestamped relative to `now`.
    fn news(&self, now: DateTime<Utc>) -> Vec<NewsItem>;

    /// Highlighted opportunities.
    fn opportunities(&self) -> Vec<Opportunity>;
}
