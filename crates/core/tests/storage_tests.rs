// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryStore, FileStore, encryption, envelope
// format, SealedStore, StorageManager
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};

use investmind_core::errors::CoreError;
use investmind_core::models::budget::{FinancialData, FixedCategory, FixedExpense};
use investmind_core::models::personal::PersonalData;
use investmind_core::models::profile::{InvestmentGoal, InvestmentHorizon, UserProfile};
use investmind_core::models::subscription::{CancellationRecord, Plan, SubscriptionData};
use investmind_core::storage::encryption::{
    decrypt, derive_key, encrypt, random_bytes, KdfParams, NONCE_LEN, SALT_LEN,
};
use investmind_core::storage::file::FileStore;
use investmind_core::storage::format::{self, CURRENT_VERSION, HEADER_SIZE, MAGIC};
use investmind_core::storage::manager::StorageManager;
use investmind_core::storage::memory::MemoryStore;
use investmind_core::storage::sealed::SealedStore;
use investmind_core::storage::traits::KeyValueStore;

/// Cheap Argon2 costs so the suite stays fast.
fn fast_params() -> KdfParams {
    KdfParams {
        memory_cost: 64,
        time_cost: 1,
        parallelism: 1,
    }
}

fn sample_profile() -> UserProfile {
    UserProfile::new(
        "Ana",
        30,
        10_000.0,
        InvestmentGoal::Moderate,
        InvestmentHorizon::Long,
        6,
        true,
    )
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", b"one").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"one".to_vec()));
        assert!(store.contains("a").unwrap());

        store.set("a", b"two").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len(), 1);

        store.remove("a").unwrap();
        assert!(!store.contains("a").unwrap());
    }

    #[test]
    fn removing_absent_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("never-set").is_ok());
    }

    #[test]
    fn keys_are_sorted() {
        let mut store = MemoryStore::new();
        store.set("b", b"").unwrap();
        store.set("a", b"").unwrap();
        store.set("c", b"").unwrap();
        assert_eq!(store.keys(), vec!["a", "b", "c"]);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[test]
    fn round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("investmind_profile", b"{\"x\":1}").unwrap();

        let path = dir.path().join("investmind_profile.json");
        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"{\"x\":1}");
        assert_eq!(
            store.get("investmind_profile").unwrap(),
            Some(b"{\"x\":1}".to_vec())
        );
    }

    #[test]
    fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("nothing").unwrap(), None);
        assert!(!store.contains("nothing").unwrap());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        store.set("k", b"v").unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.set("k", b"persisted").unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"persisted".to_vec()));
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        for key in ["", "../escape", "a/b", "with space", "dot.ted"] {
            assert!(
                matches!(store.set(key, b"x"), Err(CoreError::Storage(_))),
                "{key:?}"
            );
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Encryption primitives
// ═══════════════════════════════════════════════════════════════════

mod encryption {
    use super::*;

    #[test]
    fn kdf_defaults() {
        let p = KdfParams::default();
        assert_eq!(p.memory_cost, 19_456);
        assert_eq!(p.time_cost, 2);
        assert_eq!(p.parallelism, 1);
    }

    #[test]
    fn derive_is_deterministic_per_salt() {
        let salt = [7u8; SALT_LEN];
        let k1 = derive_key("senha", &salt, &fast_params()).unwrap();
        let k2 = derive_key("senha", &salt, &fast_params()).unwrap();
        assert_eq!(k1, k2);

        let k3 = derive_key("senha", &[8u8; SALT_LEN], &fast_params()).unwrap();
        assert_ne!(k1, k3);
        let k4 = derive_key("outra", &salt, &fast_params()).unwrap();
        assert_ne!(k1, k4);
    }

    #[test]
    fn invalid_params_are_encryption_errors() {
        let bad = KdfParams {
            memory_cost: 1,
            time_cost: 1,
            parallelism: 1,
        };
        assert!(matches!(
            derive_key("x", &[0u8; SALT_LEN], &bad),
            Err(CoreError::Encryption(_))
        ));
    }

    #[test]
    fn encrypt_decrypt() {
        let key = derive_key("senha", &[1u8; SALT_LEN], &fast_params()).unwrap();
        let nonce = [2u8; NONCE_LEN];
        let ct = encrypt(b"hello", &key, &nonce).unwrap();
        assert_eq!(ct.len(), 5 + 16);
        assert_eq!(decrypt(&ct, &key, &nonce).unwrap(), b"hello");
    }

    #[test]
    fn wrong_key_fails() {
        let key = derive_key("senha", &[1u8; SALT_LEN], &fast_params()).unwrap();
        let other = derive_key("errada", &[1u8; SALT_LEN], &fast_params()).unwrap();
        let nonce = [2u8; NONCE_LEN];
        let ct = encrypt(b"hello", &key, &nonce).unwrap();
        assert!(matches!(decrypt(&ct, &other, &nonce), Err(CoreError::Decryption)));
    }

    #[test]
    fn random_bytes_differ() {
        let a = random_bytes::<SALT_LEN>().unwrap();
        let b = random_bytes::<SALT_LEN>().unwrap();
        assert_ne!(a, b);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Envelope format
// ═══════════════════════════════════════════════════════════════════

mod envelope {
    use super::*;

    fn sample() -> Vec<u8> {
        format::write_envelope(&fast_params(), &[3u8; SALT_LEN], &[4u8; NONCE_LEN], b"ciphertext")
    }

    #[test]
    fn layout() {
        let env = sample();
        assert_eq!(&env[0..4], MAGIC);
        assert_eq!(u16::from_le_bytes([env[4], env[5]]), CURRENT_VERSION);
        assert_eq!(env.len(), HEADER_SIZE + 10);
    }

    #[test]
    fn read_back() {
        let env = sample();
        let (header, ct) = format::read_envelope(&env).unwrap();
        assert_eq!(header.version, CURRENT_VERSION);
        assert_eq!(header.kdf_params, fast_params());
        assert_eq!(header.salt, [3u8; SALT_LEN]);
        assert_eq!(header.nonce, [4u8; NONCE_LEN]);
        assert_eq!(header.ciphertext_len, 10);
        assert_eq!(ct, b"ciphertext");
    }

    #[test]
    fn too_small() {
        assert!(matches!(
            format::read_envelope(b"INVM"),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn bad_magic() {
        let mut env = sample();
        env[0] = b'X';
        assert!(matches!(
            format::read_envelope(&env),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }

    #[test]
    fn unsupported_versions() {
        for version in [0u16, CURRENT_VERSION + 1] {
            let mut env = sample();
            env[4..6].copy_from_slice(&version.to_le_bytes());
            match format::read_envelope(&env) {
                Err(CoreError::UnsupportedVersion(v)) => assert_eq!(v, version),
                other => panic!("expected UnsupportedVersion, got {other:?}"),
            }
        }
    }

    #[test]
    fn kdf_bounds_checked() {
        let mut env = sample();
        env[10..14].copy_from_slice(&100u32.to_le_bytes());
        assert!(matches!(
            format::read_envelope(&env),
            Err(CoreError::InvalidFileFormat(_))
        ));

        let mut env = sample();
        env[6..10].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(format::read_envelope(&env).is_err());
    }

    #[test]
    fn truncated_ciphertext() {
        let env = sample();
        assert!(matches!(
            format::read_envelope(&env[..env.len() - 1]),
            Err(CoreError::InvalidFileFormat(_))
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// SealedStore
// ═══════════════════════════════════════════════════════════════════

mod sealed_store {
    use super::*;

    fn sealed(password: &str) -> SealedStore<MemoryStore> {
        SealedStore::with_params(MemoryStore::new(), password, fast_params())
    }

    #[test]
    fn round_trip() {
        let mut store = sealed("senha");
        store.set("k", b"segredo").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"segredo".to_vec()));
        assert!(store.contains("k").unwrap());
    }

    #[test]
    fn inner_holds_only_envelopes() {
        let mut store = sealed("senha");
        store.set("k", b"segredo").unwrap();
        let raw = store.inner().get("k").unwrap().unwrap();
        assert_eq!(&raw[0..4], MAGIC);
        assert!(!raw.windows(7).any(|w| w == b"segredo"));
    }

    #[test]
    fn fresh_salt_and_nonce_per_write() {
        let store = sealed("senha");
        let a = store.seal(b"same").unwrap();
        let b = store.seal(b"same").unwrap();
        assert_ne!(a, b);
        assert_eq!(store.open(&a).unwrap(), b"same");
        assert_eq!(store.open(&b).unwrap(), b"same");
    }

    #[test]
    fn wrong_password() {
        let mut store = sealed("senha");
        store.set("k", b"segredo").unwrap();
        let other = SealedStore::with_params(store.into_inner(), "errada", fast_params());
        assert!(matches!(other.get("k"), Err(CoreError::Decryption)));
    }

    #[test]
    fn tampering_detected() {
        let store = sealed("senha");
        let mut env = store.seal(b"segredo").unwrap();
        let last = env.len() - 1;
        env[last] ^= 0xFF;
        assert!(matches!(store.open(&env), Err(CoreError::Decryption)));
    }

    #[test]
    fn plaintext_in_inner_store_is_rejected() {
        let mut inner = MemoryStore::new();
        inner.set("k", b"{\"plain\":true}").unwrap();
        let store = SealedStore::with_params(inner, "senha", fast_params());
        assert!(matches!(store.get("k"), Err(CoreError::InvalidFileFormat(_))));
    }

    #[test]
    fn remove_passes_through() {
        let mut store = sealed("senha");
        store.set("k", b"v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn debug_hides_password() {
        let store = sealed("super-secreta");
        let debug = format!("{store:?}");
        assert!(debug.contains("SealedStore"));
        assert!(!debug.contains("super-secreta"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    #[test]
    fn keys_use_prefix() {
        let m = StorageManager::default();
        assert_eq!(m.key::<UserProfile>(), "investmind_profile");
        assert_eq!(m.key::<FinancialData>(), "investmind_financial");
        assert_eq!(m.key::<PersonalData>(), "investmind_personal_data");
        assert_eq!(m.key::<SubscriptionData>(), "investmind_subscription");
        assert_eq!(m.key::<CancellationRecord>(), "investmind_cancellation");
        assert_eq!(StorageManager::new("t_").key::<UserProfile>(), "t_profile");
    }

    #[test]
    fn round_trip_every_record() {
        let m = StorageManager::default();
        let mut store = MemoryStore::new();
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 8, 30, 0).unwrap();

        let profile = sample_profile();
        let mut financial = FinancialData::default();
        financial.monthly_income = 7000.0;
        financial
            .fixed_expenses
            .push(FixedExpense::new("Aluguel", 1800.0, 10, FixedCategory::Housing));
        let personal = PersonalData {
            email: "ana@example.com".into(),
            cpf: "123.456.789-01".into(),
            ..PersonalData::default()
        };
        let subscription = SubscriptionData {
            is_active: true,
            expiry_date: now,
            plan: Plan::Premium,
            price: 19.90,
        };
        let cancellation = CancellationRecord {
            date: now,
            reason: "Muito caro".into(),
            personal_data: Some(personal.clone()),
        };

        m.save(&mut store, &profile).unwrap();
        m.save(&mut store, &financial).unwrap();
        m.save(&mut store, &personal).unwrap();
        m.save(&mut store, &subscription).unwrap();
        m.save(&mut store, &cancellation).unwrap();

        assert_eq!(m.load::<UserProfile, _>(&store).unwrap(), Some(profile));
        assert_eq!(m.load::<FinancialData, _>(&store).unwrap(), Some(financial));
        assert_eq!(m.load::<PersonalData, _>(&store).unwrap(), Some(personal));
        assert_eq!(m.load::<SubscriptionData, _>(&store).unwrap(), Some(subscription));
        assert_eq!(m.load::<CancellationRecord, _>(&store).unwrap(), Some(cancellation));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn stored_as_camel_case_json() {
        let m = StorageManager::default();
        let mut store = MemoryStore::new();
        m.save(&mut store, &sample_profile()).unwrap();
        let raw = store.get("investmind_profile").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["hasEmergencyFund"], true);
    }

    #[test]
    fn absent_is_none() {
        let m = StorageManager::default();
        let store = MemoryStore::new();
        assert_eq!(m.load::<UserProfile, _>(&store).unwrap(), None);
        assert!(!m.exists::<UserProfile, _>(&store).unwrap());
    }

    #[test]
    fn unparsable_is_none_but_exists() {
        let m = StorageManager::default();
        let mut store = MemoryStore::new();
        store.set("investmind_profile", b"{not json").unwrap();
        store.set("investmind_subscription", b"{\"isActive\": true}").unwrap();
        assert_eq!(m.load::<UserProfile, _>(&store).unwrap(), None);
        assert_eq!(m.load::<SubscriptionData, _>(&store).unwrap(), None);
        assert!(m.exists::<UserProfile, _>(&store).unwrap());
    }

    #[test]
    fn clear_removes_only_that_record() {
        let m = StorageManager::default();
        let mut store = MemoryStore::new();
        m.save(&mut store, &sample_profile()).unwrap();
        m.save(&mut store, &FinancialData::default()).unwrap();
        m.clear::<UserProfile, _>(&mut store).unwrap();
        assert!(!m.exists::<UserProfile, _>(&store).unwrap());
        assert!(m.exists::<FinancialData, _>(&store).unwrap());
        m.clear::<UserProfile, _>(&mut store).unwrap();
    }

    #[test]
    fn prefixes_isolate_records() {
        let a = StorageManager::new("a_");
        let b = StorageManager::new("b_");
        let mut store = MemoryStore::new();
        a.save(&mut store, &sample_profile()).unwrap();
        assert!(b.load::<UserProfile, _>(&store).unwrap().is_none());
    }

    #[test]
    fn works_through_trait_object() {
        let m = StorageManager::default();
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        m.save(store.as_mut(), &sample_profile()).unwrap();
        assert!(m.load::<UserProfile, _>(store.as_ref()).unwrap().is_some());
    }

    #[test]
    fn sealed_round_trip() {
        let m = StorageManager::default();
        let mut store = SealedStore::with_params(MemoryStore::new(), "senha", fast_params());
        m.save(&mut store, &sample_profile()).unwrap();
        assert_eq!(m.load::<UserProfile, _>(&store).unwrap(), Some(sample_profile()));
    }

    #[test]
    fn store_errors_propagate() {
        let m = StorageManager::default();
        let mut store = SealedStore::with_params(MemoryStore::new(), "senha", fast_params());
        m.save(&mut store, &sample_profile()).unwrap();
        let wrong = SealedStore::with_params(store.into_inner(), "errada", fast_params());
        assert!(matches!(
            m.load::<UserProfile, _>(&wrong),
            Err(CoreError::Decryption)
        ));
    }

    #[test]
    fn file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let m = StorageManager::default();
        let mut store = FileStore::open(dir.path()).unwrap();
        m.save(&mut store, &sample_profile()).unwrap();
        assert!(dir.path().join("investmind_profile.json").exists());
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(m.load::<UserProfile, _>(&reopened).unwrap(), Some(sample_profile()));
    }
}
