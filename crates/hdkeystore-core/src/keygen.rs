//! Asymmetric key generation from a deterministic byte stream

use std::io::Read;

use ed25519_dalek::{SigningKey, SECRET_KEY_LENGTH};
use zeroize::Zeroizing;

use crate::error::KeyGenError;

/// Key pair produced by a [`KeyGenerator`].
pub struct GeneratedKey {
    pub public_key: Vec<u8>,
    pub private_key: Zeroizing<Vec<u8>>,
}

/// Turns a randomness stream into a key pair.
///
/// Must be deterministic: the same stream always yields the same key.
pub trait KeyGenerator {
    fn generate_key(&self, stream: &mut dyn Read) -> Result<GeneratedKey, KeyGenError>;
}

/// Ed25519 key generation.
///
/// Reads a 32-byte secret from the stream. The private key is the 64-byte
/// keypair encoding (secret followed by the public key).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519KeyGenerator;

impl KeyGenerator for Ed25519KeyGenerator {
    fn generate_key(&self, stream: &mut dyn Read) -> Result<GeneratedKey, KeyGenError> {
        let mut secret = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        stream
            .read_exact(&mut secret[..])
            .map_err(|e| KeyGenError::InsufficientEntropy(e.to_string()))?;

        let signing_key = SigningKey::from_bytes(&secret);
        let keypair = Zeroizing::new(signing_key.to_keypair_bytes());

        Ok(GeneratedKey {
            public_key: signing_key.verifying_key().to_bytes().to_vec(),
            private_key: Zeroizing::new(keypair.to_vec()),
        })
    }
}
