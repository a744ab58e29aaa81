use chrono::{DateTime, Duration, Utc};

use crate::errors::CoreError;
use crate::models::personal::PersonalData;
use crate::models::subscription::{CancellationRecord, Plan, SubscriptionData};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Subscription lifecycle rules. Persistence is the caller's job.
///
/// Every time-dependent call takes `now` explicitly.
pub struct SubscriptionService {
    /// Length of the period granted by `activate`
    duration_days: i64,
    /// Monthly price (BRL) written into new records
    price: f64,
}

impl SubscriptionService {
    /// Service granting `duration_days` per activation at `price` BRL.
    pub fn new(duration_days: i64, price: f64) -> Self {
        Self {
            duration_days,
            price,
        }
    }

    /// A fresh premium subscription running `duration_days` from `now`.
    pub fn activate(&self, now: DateTime<Utc>) -> Result<SubscriptionData, CoreError> {
        self.activate_for(self.duration_days, now)
    }

    /// Same as `activate`, with an explicit period length.
    /// Fails with `ValidationError` if `duration_days` is not positive or
    /// the expiry would overflow the calendar.
    pub fn activate_for(
        &self,
        duration_days: i64,
        now: DateTime<Utc>,
    ) -> Result<SubscriptionData, CoreError> {
        if duration_days <= 0 {
            return Err(CoreError::ValidationError(format!(
                "Subscription duration must be positive, got {duration_days} days"
            )));
        }
        let expiry_date = now
            .checked_add_signed(Duration::days(duration_days))
            .ok_or_else(|| {
                CoreError::ValidationError(format!(
                    "Subscription duration of {duration_days} days is out of range"
                ))
            })?;
        Ok(SubscriptionData {
            is_active: true,
            expiry_date,
            plan: Plan::Premium,
            price: self.price,
        })
    }

    /// Access check: a record must exist, be flagged active and not be expired.
    #[must_use]
    pub fn is_active(&self, subscription: Option<&SubscriptionData>, now: DateTime<Utc>) -> bool {
        subscription.is_some_and(|s| s.grants_access(now))
    }

    /// Build the soft-cancel marker. Access continues until expiry.
    pub fn cancel(
        &self,
        reason: impl Into<String>,
        personal_data: Option<PersonalData>,
        now: DateTime<Utc>,
    ) -> CancellationRecord {
        CancellationRecord {
            date: now,
            reason: reason.into(),
            personal_data,
        }
    }

    /// Whole days left, rounded up, never negative.
    #[must_use]
    pub fn days_remaining(&self, subscription: Option<&SubscriptionData>, now: DateTime<Utc>) -> i64 {
        let Some(sub) = subscription else {
            return 0;
        };
        let millis = (sub.expiry_date - now).num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    }

    /// Expiry date as `dd/mm/yyyy`, or an empty string without a subscription.
    #[must_use]
    pub fn format_expiry(&self, subscription: Option<&SubscriptionData>) -> String {
        subscription
            .map(|s| s.expiry_date.format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }
}

impl Default for SubscriptionService {
    /// 30-day periods at R$ 19,90.
    fn default() -> Self {
        Self::new(30, 19.90)
    }
}
