use super::encryption::{KdfParams, NONCE_LEN, SALT_LEN};
use crate::errors::CoreError;

/// Magic bytes identifying a sealed InvestMind record.
pub const MAGIC: &[u8; 4] = b"INVM";

/// Current envelope version.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes:
/// magic(4) + version(2) + kdf_params(12) + salt(16) + nonce(12) + ciphertext_len(8) = 54
pub const HEADER_SIZE: usize = 54;

/// Parsed envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext_len: u64,
}

/// Assemble a sealed record.
///
/// Layout:
/// ```text
/// [INVM: 4B] [version: 2B LE] [memory_cost: 4B LE] [time_cost: 4B LE]
/// [parallelism: 4B LE] [salt: 16B] [nonce: 12B] [ciphertext_len: 8B LE]
/// [ciphertext: variable]
/// ```
pub fn write_envelope(
    kdf_params: &KdfParams,
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&CURRENT_VERSION.to_le_bytes());
    buf.extend_from_slice(&kdf_params.memory_cost.to_le_bytes());
    buf.extend_from_slice(&kdf_params.time_cost.to_le_bytes());
    buf.extend_from_slice(&kdf_params.parallelism.to_le_bytes());
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(ciphertext);
    buf
}

/// Little-endian cursor over the header bytes.
struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn take<const N: usize>(&mut self, what: &str) -> Result<[u8; N], CoreError> {
        let end = self.offset + N;
        let bytes: [u8; N] = self
            .data
            .get(self.offset..end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| CoreError::InvalidFileFormat(format!("Failed to read {what}")))?;
        self.offset = end;
        Ok(bytes)
    }

    fn u16(&mut self, what: &str) -> Result<u16, CoreError> {
        Ok(u16::from_le_bytes(self.take(what)?))
    }

    fn u32(&mut self, what: &str) -> Result<u32, CoreError> {
        Ok(u32::from_le_bytes(self.take(what)?))
    }

    fn u64(&mut self, what: &str) -> Result<u64, CoreError> {
        Ok(u64::from_le_bytes(self.take(what)?))
    }
}

/// Parse a sealed record. Returns the header and the ciphertext slice.
pub fn read_envelope(data: &[u8]) -> Result<(EnvelopeHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "Record too small to be a sealed InvestMind record".into(),
        ));
    }
    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not a sealed InvestMind record".into(),
        ));
    }

    let mut r = Reader { data, offset: 4 };

    let version = r.u16("version")?;
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf_params = KdfParams {
        memory_cost: r.u32("KDF memory_cost")?,
        time_cost: r.u32("KDF time_cost")?,
        parallelism: r.u32("KDF parallelism")?,
    };
    check_kdf_bounds(&kdf_params)?;

    let salt = r.take::<SALT_LEN>("salt")?;
    let nonce = r.take::<NONCE_LEN>("nonce")?;
    let ciphertext_len = r.u64("ciphertext length")?;

    let start = r.offset;
    let available = (data.len() - start) as u64;
    if available < ciphertext_len {
        return Err(CoreError::InvalidFileFormat(format!(
            "Record truncated: expected {ciphertext_len} bytes of ciphertext, got {available}"
        )));
    }
    let ciphertext = &data[start..start + ciphertext_len as usize];

    Ok((
        EnvelopeHeader {
            version,
            kdf_params,
            salt,
            nonce,
            ciphertext_len,
        },
        ciphertext,
    ))
}

/// Reject cost parameters a crafted record could use to exhaust resources.
/// memory_cost 8 KiB..=1 GiB, time_cost 1..=20, parallelism 1..=16.
fn check_kdf_bounds(p: &KdfParams) -> Result<(), CoreError> {
    if !(8..=1_048_576).contains(&p.memory_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF memory_cost out of safe range: {} KiB (expected 8..1048576)",
            p.memory_cost
        )));
    }
    if !(1..=20).contains(&p.time_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF time_cost out of safe range: {} (expected 1..20)",
            p.time_cost
        )));
    }
    if !(1..=16).contains(&p.parallelism) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF parallelism out of safe range: {} (expected 1..16)",
            p.parallelism
        )));
    }
    Ok(())
}
