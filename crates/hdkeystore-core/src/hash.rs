//! Memory-hard hashing
//!
//! Every derivation step runs one Argon2 invocation, so each step costs
//! the full configured memory and time. There is no cancellation: the
//! calling thread blocks until the hash completes.

use argon2::Argon2;
use zeroize::Zeroizing;

use crate::config::HashConfig;
use crate::error::HashError;

/// A deterministic memory-hard hash.
///
/// Implementations must be reentrant: the store calls them concurrently
/// from any thread that holds a shared reference.
pub trait MemoryHardHash {
    fn hash(
        &self,
        config: &HashConfig,
        input: &[u8],
        salt: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, HashError>;
}

/// Argon2 backed by the `argon2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl MemoryHardHash for Argon2Hasher {
    fn hash(
        &self,
        config: &HashConfig,
        input: &[u8],
        salt: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, HashError> {
        let params = config.params()?;
        let argon2 = Argon2::new(config.algorithm(), config.argon2_version()?, params);

        log::trace!(
            "argon2 {:?} t={} m={}KiB p={} salt={}B input={}B",
            config.variant,
            config.t_cost,
            config.m_cost,
            config.p_cost,
            salt.len(),
            input.len()
        );

        let mut output = Zeroizing::new(vec![0u8; config.output_len]);
        argon2
            .hash_password_into(input, salt, &mut output)
            .map_err(|e| HashError::Failed(e.to_string()))?;

        Ok(output)
    }
}
