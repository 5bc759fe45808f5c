//! Key material layout
//!
//! ```text
//! [ private key / seed region (64 bytes) ][ chain code (bytes 64..) ]
//! ```
//!
//! The seed region is the hash input for the next level. The chain code is
//! only ever used as the next level's salt. Keys produced by the store are
//! always exactly 96 bytes.
//!
//! Equality is constant-time.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{MIN_KEY_MATERIAL_LEN, SEED_REGION_LEN};
use crate::error::KeyMaterialError;

/// 64-byte private key followed by the chain code. Always at least 96 bytes.
///
/// Each instance owns its buffer; deriving a child never touches the parent.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    bytes: Vec<u8>,
}

impl KeyMaterial {
    /// Assemble key material from a private key and the hash tail.
    pub(crate) fn assemble(private_key: &[u8], chain_code: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(private_key.len() + chain_code.len());
        bytes.extend_from_slice(private_key);
        bytes.extend_from_slice(chain_code);
        Self { bytes }
    }

    /// Wrap previously derived bytes, e.g. to continue a derivation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyMaterialError> {
        if bytes.len() < MIN_KEY_MATERIAL_LEN {
            return Err(KeyMaterialError::TooShort {
                len: bytes.len(),
                min: MIN_KEY_MATERIAL_LEN,
            });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes `[0, 64)`, input to the next derivation.
    pub fn seed_region(&self) -> &[u8] {
        &self.bytes[..SEED_REGION_LEN]
    }

    /// Bytes `[64, len)`, salt for the next derivation.
    pub fn chain_code(&self) -> &[u8] {
        &self.bytes[SEED_REGION_LEN..]
    }

    /// The private key. Same bytes as the seed region.
    pub fn private_key(&self) -> &[u8] {
        self.seed_region()
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.bytes.as_slice().ct_eq(other.bytes.as_slice()))
    }
}

impl Eq for KeyMaterial {}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for KeyMaterial {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
