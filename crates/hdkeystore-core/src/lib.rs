//! HD Keystore Core
//!
//! Deterministic hierarchical derivation of private key material from a
//! single seed.
//!
//! # Derivation
//!
//! - Root: Argon2i over the seed with a fixed salt, first 64 bytes of the
//!   digest seed an Ed25519 key, last 32 bytes become the chain code.
//! - Child: Argon2i over the parent's first 64 bytes plus a path segment,
//!   salted with the parent's chain code.
//! - Path: one child step per segment, in order.
//!
//! Every step costs one full memory-hard hash, which makes offline guessing
//! of the seed expensive.
//!
//! ```no_run
//! use hdkeystore_core::{DerivationPath, Store};
//!
//! let store = Store::new(&[0x01; 16])?;
//! let path: DerivationPath = "m/0/1".parse()?;
//! let key = store.key_at(&path)?;
//! assert_eq!(key.len(), 96);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod keygen;
pub mod material;
pub mod memory;
pub mod path;
pub mod store;

pub use config::{HashConfig, HashVariant, ROOT_SALT};
pub use error::{
    DerivationError, HashError, KeyGenError, KeyMaterialError, PathError, StageError, StoreError,
};
pub use hash::{Argon2Hasher, MemoryHardHash};
pub use keygen::{Ed25519KeyGenerator, GeneratedKey, KeyGenerator};
pub use material::KeyMaterial;
pub use path::{index_segment, DerivationPath};
pub use store::Store;
