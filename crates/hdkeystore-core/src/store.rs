//! Hierarchical key store
//!
//! ```text
//! root    = keygen(argon2(seed, ROOT_SALT)[..64]) ++ argon2(..)[64..96]
//! child   = keygen(argon2(parent[..64] ++ segment, parent[64..])[..64]) ++ argon2(..)[64..96]
//! key(p)  = fold(child, root, p)
//! ```
//!
//! The store holds only the root key material and the hash configuration.
//! Both are immutable after construction, so a `&Store` can be shared
//! across threads. Non-root keys are recomputed on every call and never
//! cached.

use std::io::Cursor;

use zeroize::Zeroizing;

use crate::config::{HashConfig, HASH_OUTPUT_LEN, MIN_KEY_MATERIAL_LEN, ROOT_SALT, SEED_REGION_LEN};
use crate::error::{DerivationError, HashError, KeyGenError, StageError, StoreError};
use crate::hash::{Argon2Hasher, MemoryHardHash};
use crate::keygen::{Ed25519KeyGenerator, KeyGenerator};
use crate::material::KeyMaterial;
use crate::path::DerivationPath;

pub struct Store<H = Argon2Hasher, G = Ed25519KeyGenerator> {
    root: KeyMaterial,
    config: HashConfig,
    hasher: H,
    keygen: G,
}

impl Store {
    /// Create a store from a seed with the default Argon2i profile.
    pub fn new(seed: &[u8]) -> Result<Self, StoreError> {
        Self::with_config(seed, HashConfig::default())
    }

    pub fn with_config(seed: &[u8], config: HashConfig) -> Result<Self, StoreError> {
        Self::with_primitives(seed, config, Argon2Hasher, Ed25519KeyGenerator)
    }
}

impl<H: MemoryHardHash, G: KeyGenerator> Store<H, G> {
    /// Create a store with caller-supplied hash and key generation primitives.
    ///
    /// The seed is only borrowed for the duration of the call.
    pub fn with_primitives(
        seed: &[u8],
        config: HashConfig,
        hasher: H,
        keygen: G,
    ) -> Result<Self, StoreError> {
        config.validate().map_err(StoreError::Config)?;

        let root =
            generate(&hasher, &keygen, &config, seed, &ROOT_SALT).map_err(StoreError::RootKey)?;
        log::debug!("generated root key material ({} bytes)", root.len());

        Ok(Self {
            root,
            config,
            hasher,
            keygen,
        })
    }

    pub fn root(&self) -> &KeyMaterial {
        &self.root
    }

    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Derive one level below `parent`.
    ///
    /// The parent's seed region plus `segment` is hashed with the parent's
    /// chain code as salt. The result is a fresh buffer; `parent` is only read.
    pub fn derive_child(
        &self,
        parent: &KeyMaterial,
        segment: &[u8],
    ) -> Result<KeyMaterial, StageError> {
        if parent.len() < MIN_KEY_MATERIAL_LEN {
            return Err(StageError::MalformedParent {
                len: parent.len(),
                min: MIN_KEY_MATERIAL_LEN,
            });
        }

        let mut input = Zeroizing::new(Vec::with_capacity(SEED_REGION_LEN + segment.len()));
        input.extend_from_slice(parent.seed_region());
        input.extend_from_slice(segment);

        generate(
            &self.hasher,
            &self.keygen,
            &self.config,
            &input,
            parent.chain_code(),
        )
    }

    /// Derive the key at `path` starting from the root.
    ///
    /// An empty path returns a copy of the root key material.
    pub fn key<S: AsRef<[u8]>>(&self, path: &[S]) -> Result<KeyMaterial, DerivationError> {
        self.key_from(&self.root, path)
    }

    pub fn key_at(&self, path: &DerivationPath) -> Result<KeyMaterial, DerivationError> {
        self.key(path.segments())
    }

    /// Walk `path` starting from arbitrary key material.
    ///
    /// Stops at the first failing level; no partial key is returned.
    pub fn key_from<S: AsRef<[u8]>>(
        &self,
        start: &KeyMaterial,
        path: &[S],
    ) -> Result<KeyMaterial, DerivationError> {
        let mut key = start.clone();
        for (level, segment) in path.iter().enumerate() {
            key = self
                .derive_child(&key, segment.as_ref())
                .map_err(|cause| DerivationError { level, cause })?;
            log::debug!("derived level {} key", level);
        }
        Ok(key)
    }
}

/// Hash `input` with `salt`, feed the first 64 bytes of the digest to the
/// key generator and append the last 32 bytes as the new chain code.
///
/// The private key must be exactly 64 bytes so the chain code always
/// starts at byte 64.
fn generate<H: MemoryHardHash, G: KeyGenerator>(
    hasher: &H,
    keygen: &G,
    config: &HashConfig,
    input: &[u8],
    salt: &[u8],
) -> Result<KeyMaterial, StageError> {
    let hash = hasher.hash(config, input, salt)?;
    if hash.len() != HASH_OUTPUT_LEN {
        return Err(HashError::OutputLength {
            expected: HASH_OUTPUT_LEN,
            actual: hash.len(),
        }
        .into());
    }

    let generated = keygen.generate_key(&mut Cursor::new(&hash[..SEED_REGION_LEN]))?;
    if generated.private_key.len() != SEED_REGION_LEN {
        return Err(KeyGenError::PrivateKeyLength {
            expected: SEED_REGION_LEN,
            actual: generated.private_key.len(),
        }
        .into());
    }

    Ok(KeyMaterial::assemble(
        &generated.private_key,
        &hash[SEED_REGION_LEN..],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keygen::GeneratedKey;
    use std::io::Read;

    fn light_config() -> HashConfig {
        HashConfig {
            t_cost: 1,
            m_cost: 64,
            p_cost: 1,
            ..HashConfig::default()
        }
    }

    /// Returns a fixed digest of the wrong size.
    struct ShortHasher;

    impl MemoryHardHash for ShortHasher {
        fn hash(&self, _: &HashConfig, _: &[u8], _: &[u8]) -> Result<Zeroizing<Vec<u8>>, HashError> {
            Ok(Zeroizing::new(vec![0u8; 64]))
        }
    }

    /// Consumes the stream but returns a 32-byte private key.
    struct TruncatingKeyGen;

    impl KeyGenerator for TruncatingKeyGen {
        fn generate_key(&self, stream: &mut dyn Read) -> Result<GeneratedKey, KeyGenError> {
            let mut buf = [0u8; 32];
            stream
                .read_exact(&mut buf)
                .map_err(|e| KeyGenError::InsufficientEntropy(e.to_string()))?;
            Ok(GeneratedKey {
                public_key: Vec::new(),
                private_key: Zeroizing::new(buf.to_vec()),
            })
        }
    }

    /// Returns an 80-byte private key.
    struct WideKeyGen;

    impl KeyGenerator for WideKeyGen {
        fn generate_key(&self, stream: &mut dyn Read) -> Result<GeneratedKey, KeyGenError> {
            let mut buf = [0u8; 64];
            stream
                .read_exact(&mut buf)
                .map_err(|e| KeyGenError::InsufficientEntropy(e.to_string()))?;
            let mut private_key = buf.to_vec();
            private_key.extend_from_slice(&[0xEE; 16]);
            Ok(GeneratedKey {
                public_key: Vec::new(),
                private_key: Zeroizing::new(private_key),
            })
        }
    }

    /// Needs more randomness than the 64 bytes it is given.
    struct GreedyKeyGen;

    impl KeyGenerator for GreedyKeyGen {
        fn generate_key(&self, stream: &mut dyn Read) -> Result<GeneratedKey, KeyGenError> {
            let mut buf = [0u8; 128];
            stream
                .read_exact(&mut buf)
                .map_err(|e| KeyGenError::InsufficientEntropy(e.to_string()))?;
            unreachable!("stream only holds 64 bytes")
        }
    }

    #[test]
    fn test_root_matches_manual_composition() {
        let config = light_config();
        let seed = [0x01u8; 16];
        let store = Store::with_config(&seed, config.clone()).unwrap();

        let hash = Argon2Hasher.hash(&config, &seed, &ROOT_SALT).unwrap();
        let key = Ed25519KeyGenerator
            .generate_key(&mut Cursor::new(&hash[..64]))
            .unwrap();

        assert_eq!(store.root().len(), 96);
        assert_eq!(store.root().private_key(), key.private_key.as_slice());
        assert_eq!(store.root().chain_code(), &hash[64..]);
    }

    #[test]
    fn test_child_matches_manual_composition() {
        let config = light_config();
        let store = Store::with_config(b"seed material", config.clone()).unwrap();
        let root = store.root();

        let child = store.derive_child(root, &[0, 0, 0, 1]).unwrap();

        let mut input = root.seed_region().to_vec();
        input.extend_from_slice(&[0, 0, 0, 1]);
        let hash = Argon2Hasher.hash(&config, &input, root.chain_code()).unwrap();
        let key = Ed25519KeyGenerator
            .generate_key(&mut Cursor::new(&hash[..64]))
            .unwrap();

        assert_eq!(child.private_key(), key.private_key.as_slice());
        assert_eq!(child.chain_code(), &hash[64..]);
    }

    #[test]
    fn test_derive_child_leaves_parent_untouched() {
        let store = Store::with_config(b"seed", light_config()).unwrap();
        let before = store.root().clone();
        let _ = store.derive_child(store.root(), b"a").unwrap();
        let _ = store.key(&[b"a", b"b"]).unwrap();
        assert_eq!(store.root(), &before);
    }

    #[test]
    fn test_empty_path_is_root() {
        let store = Store::with_config(b"seed", light_config()).unwrap();
        let empty: [&[u8]; 0] = [];
        assert_eq!(&store.key(&empty).unwrap(), store.root());
        assert_eq!(&store.key_at(&DerivationPath::root()).unwrap(), store.root());
    }

    #[test]
    fn test_empty_segment_still_derives() {
        let store = Store::with_config(b"seed", light_config()).unwrap();
        let child = store.derive_child(store.root(), &[]).unwrap();
        assert_ne!(&child, store.root());
        assert_eq!(child.len(), 96);
    }

    #[test]
    fn test_malformed_parent_is_rejected() {
        let store = Store::with_config(b"seed", light_config()).unwrap();
        let parent = KeyMaterial::assemble(&[0u8; 32], &[0u8; 32]);
        assert_eq!(
            store.derive_child(&parent, b"x").unwrap_err(),
            StageError::MalformedParent { len: 64, min: 96 }
        );
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let config = HashConfig {
            p_cost: 0,
            ..light_config()
        };
        let result = Store::with_config(b"seed", config);
        assert!(matches!(result, Err(StoreError::Config(_))));
    }

    #[test]
    fn test_wrong_hash_length_is_hash_error() {
        let result =
            Store::with_primitives(b"seed", light_config(), ShortHasher, Ed25519KeyGenerator);
        assert!(matches!(
            result,
            Err(StoreError::RootKey(StageError::Hash(HashError::OutputLength {
                expected: 96,
                actual: 64
            })))
        ));
    }

    #[test]
    fn test_short_private_key_is_keygen_error() {
        let result = Store::with_primitives(b"seed", light_config(), Argon2Hasher, TruncatingKeyGen);
        assert!(matches!(
            result,
            Err(StoreError::RootKey(StageError::KeyGen(
                KeyGenError::PrivateKeyLength { expected: 64, actual: 32 }
            )))
        ));
    }

    #[test]
    fn test_long_private_key_is_keygen_error() {
        let result = Store::with_primitives(b"seed", light_config(), Argon2Hasher, WideKeyGen);
        assert!(matches!(
            result,
            Err(StoreError::RootKey(StageError::KeyGen(
                KeyGenError::PrivateKeyLength { expected: 64, actual: 80 }
            )))
        ));
    }

    #[test]
    fn test_chain_code_is_everything_after_seed_region() {
        let store = Store::with_config(b"seed", light_config()).unwrap();
        let root = store.root();
        assert_eq!(root.len(), 96);
        assert_eq!(root.chain_code(), &root.as_bytes()[64..]);

        let child = store.derive_child(root, b"x").unwrap();
        assert_eq!(child.chain_code(), &child.as_bytes()[64..]);
    }

    #[test]
    fn test_malformed_start_fails_at_level_zero() {
        let store = Store::with_config(b"seed", light_config()).unwrap();
        let start = KeyMaterial::assemble(&[0u8; 40], &[0u8; 32]);
        assert_eq!(
            store.key_from(&start, &[b"a", b"b"]).unwrap_err(),
            DerivationError {
                level: 0,
                cause: StageError::MalformedParent { len: 72, min: 96 },
            }
        );
    }

    #[test]
    fn test_exhausted_stream_is_keygen_error() {
        let result = Store::with_primitives(b"seed", light_config(), Argon2Hasher, GreedyKeyGen);
        assert!(matches!(
            result,
            Err(StoreError::RootKey(StageError::KeyGen(
                KeyGenError::InsufficientEntropy(_)
            )))
        ));
    }

    #[test]
    fn test_store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Store>();
    }
}
