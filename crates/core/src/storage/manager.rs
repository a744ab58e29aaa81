use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::traits::KeyValueStore;
use crate::errors::CoreError;
use crate::models::budget::FinancialData;
use crate::models::personal::PersonalData;
use crate::models::profile::UserProfile;
use crate::models::subscription::{CancellationRecord, SubscriptionData};

/// A record persisted as one JSON document under a fixed key.
pub trait StoredRecord: Serialize + DeserializeOwned {
    /// Key suffix; the full key is `<prefix><KEY>`.
    const KEY: &'static str;
}

impl StoredRecord for UserProfile {
    const KEY: &'static str = "profile";
}

impl StoredRecord for FinancialData {
    const KEY: &'static str = "financial";
}

impl StoredRecord for PersonalData {
    const KEY: &'static str = "personal_data";
}

impl StoredRecord for SubscriptionData {
    const KEY: &'static str = "subscription";
}

impl StoredRecord for CancellationRecord {
    const KEY: &'static str = "cancellation";
}

/// Typed save / load / clear for every persisted record.
///
/// Flow: record → serde_json → bytes → `KeyValueStore` under `<prefix><KEY>`.
#[derive(Debug, Clone)]
pub struct StorageManager {
    prefix: String,
}

impl StorageManager {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Full storage key for record type `R`.
    pub fn key<R: StoredRecord>(&self) -> String {
        format!("{}{}", self.prefix, R::KEY)
    }

    /// Serialize and store `record`, overwriting any previous value.
    pub fn save<R, S>(&self, store: &mut S, record: &R) -> Result<(), CoreError>
    where
        R: StoredRecord,
        S: KeyValueStore + ?Sized,
    {
        let key = self.key::<R>();
        let bytes = serde_json::to_vec(record)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize {key}: {e}")))?;
        store.set(&key, &bytes)?;
        debug!(key = %key, bytes = bytes.len(), "saved record");
        Ok(())
    }

    /// Load record `R`.
    ///
    /// Absent or unparsable documents both come back as `Ok(None)`; the
    /// latter is logged. Errors from the store itself (I/O, decryption) are
    /// returned as-is.
    pub fn load<R, S>(&self, store: &S) -> Result<Option<R>, CoreError>
    where
        R: StoredRecord,
        S: KeyValueStore + ?Sized,
    {
        let key = self.key::<R>();
        let Some(bytes) = store.get(&key)? else {
            return Ok(None);
        };
        match serde_json::from_slice::<R>(&bytes) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(key = %key, error = %e, "ignoring unparsable record");
                Ok(None)
            }
        }
    }

    /// Remove record `R`.
    pub fn clear<R, S>(&self, store: &mut S) -> Result<(), CoreError>
    where
        R: StoredRecord,
        S: KeyValueStore + ?Sized,
    {
        let key = self.key::<R>();
        store.remove(&key)?;
        debug!(key = %key, "cleared record");
        Ok(())
    }

    /// Whether anything, parsable or not, is stored for `R`.
    pub fn exists<R, S>(&self, store: &S) -> Result<bool, CoreError>
    where
        R: StoredRecord,
        S: KeyValueStore + ?Sized,
    {
        store.contains(&self.key::<R>())
    }
}

impl Default for StorageManager {
    fn default() -> Self {
        Self::new("investmind_")
    }
}
