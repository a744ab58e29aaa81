use super::encryption::{self, KdfParams, NONCE_LEN, SALT_LEN};
use super::format;
use super::traits::KeyValueStore;
use crate::errors::CoreError;

/// Encrypts every value before handing it to the inner store.
///
/// Flow on write: value → AES-256-GCM(Argon2id(password, fresh salt)) → envelope.
/// Each write uses a fresh salt and nonce. Keys stay in plaintext.
pub struct SealedStore<S: KeyValueStore> {
    inner: S,
    password: String,
    params: KdfParams,
}

impl<S: KeyValueStore> std::fmt::Debug for SealedStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SealedStore")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> SealedStore<S> {
    pub fn new(inner: S, password: impl Into<String>) -> Self {
        Self::with_params(inner, password, KdfParams::default())
    }

    /// Use explicit Argon2id costs for new writes. Reads always use the
    /// costs recorded in each envelope.
    pub fn with_params(inner: S, password: impl Into<String>, params: KdfParams) -> Self {
        Self {
            inner,
            password: password.into(),
            params,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Seal `plaintext` into an envelope under this store's password.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CoreError> {
        let salt = encryption::random_bytes::<SALT_LEN>()?;
        let nonce = encryption::random_bytes::<NONCE_LEN>()?;
        let key = encryption::derive_key(&self.password, &salt, &self.params)?;
        let ciphertext = encryption::encrypt(plaintext, &key, &nonce)?;
        Ok(format::write_envelope(&self.params, &salt, &nonce, &ciphertext))
    }

    /// Open an envelope produced by `seal`.
    pub fn open(&self, envelope: &[u8]) -> Result<Vec<u8>, CoreError> {
        let (header, ciphertext) = format::read_envelope(envelope)?;
        let key = encryption::derive_key(&self.password, &header.salt, &header.kdf_params)?;
        encryption::decrypt(ciphertext, &key, &header.nonce)
    }
}

impl<S: KeyValueStore> KeyValueStore for SealedStore<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        match self.inner.get(key)? {
            Some(envelope) => Ok(Some(self.open(&envelope)?)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), CoreError> {
        let envelope = self.seal(value)?;
        self.inner.set(key, &envelope)
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        self.inner.remove(key)
    }

    fn contains(&self, key: &str) -> Result<bool, CoreError> {
        self.inner.contains(key)
    }
}
