use crate::errors::CoreError;

/// Persistence port: a flat string-keyed byte store.
///
/// Mirrors the browser's local key-value storage. Writes are complete
/// overwrites; there are no partial updates and no locking. Everything above
/// this trait (record stores, facade) is storage-agnostic.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;

    /// Whether anything is stored under `key`.
    fn contains(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self.get(key)?.is_some())
    }
}
