use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Runtime configuration for the facade and its stores.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Prefix prepended to every storage key (e.g., "investmind_profile").
    pub key_prefix: String,

    /// Length of a subscription period granted by one activation.
    pub subscription_duration_days: i64,

    /// Monthly price written into new subscription records (BRL).
    pub subscription_price: f64,

    /// Age after which the simulated news catalog is regenerated.
    pub news_refresh_secs: i64,

    /// Show the paywall instead of the app while no subscription is active.
    pub require_subscription: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_prefix: "investmind_".to_string(),
            subscription_duration_days: 30,
            subscription_price: 19.90,
            news_refresh_secs: 120,
            require_subscription: true,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.subscription_duration_days <= 0 {
            return Err(CoreError::ValidationError(format!(
                "subscriptionDurationDays must be positive, got {}",
                self.subscription_duration_days
            )));
        }
        if self.news_refresh_secs <= 0 {
            return Err(CoreError::ValidationError(format!(
                "newsRefreshSecs must be positive, got {}",
                self.news_refresh_secs
            )));
        }
        if !self.subscription_price.is_finite() || self.subscription_price < 0.0 {
            return Err(CoreError::ValidationError(
                "subscriptionPrice must be a non-negative amount".into(),
            ));
        }
        Ok(())
    }
}
