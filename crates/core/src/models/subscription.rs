use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::personal::PersonalData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Premium,
}

/// Mock subscription state.
///
/// Access is granted only while `is_active` is set and `expiry_date` lies in
/// the future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionData {
    pub is_active: bool,
    pub expiry_date: DateTime<Utc>,
    pub plan: Plan,
    /// Monthly price in BRL
    pub price: f64,
}

impl SubscriptionData {
    #[must_use]
    pub fn grants_access(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.expiry_date > now
    }
}

/// Marker written when the user cancels. Its presence alone means
/// "cancelled"; the subscription record itself is left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationRecord {
    pub date: DateTime<Utc>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_data: Option<PersonalData>,
}
