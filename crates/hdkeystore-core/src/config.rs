//! Argon2 configuration and derivation constants
//!
//! Defaults follow the OWASP Argon2 guidance: 64 MiB memory, 3 iterations
//! and 4 lanes. The variant is Argon2i (data-independent memory access).

use argon2::{Algorithm, Params, Version};
use serde::{Deserialize, Serialize};

use crate::error::HashError;

pub const DEFAULT_T_COST: u32 = 3;
pub const DEFAULT_M_COST: u32 = 65536; // 64 MiB
pub const DEFAULT_P_COST: u32 = 4;

/// Bytes of hash output consumed per derivation step.
pub const HASH_OUTPUT_LEN: usize = 96;

/// Leading bytes of key material fed into the next derivation.
pub const SEED_REGION_LEN: usize = 64;

/// Trailing bytes of key material, used only as the next salt.
pub const CHAIN_CODE_LEN: usize = 32;

/// Shortest valid key material: a full seed region plus a chain code.
pub const MIN_KEY_MATERIAL_LEN: usize = SEED_REGION_LEN + CHAIN_CODE_LEN;

/// Salt used when hashing the seed into the root key.
pub const ROOT_SALT: [u8; 16] = [
    0x53, 0x78, 0x3e, 0x4c, //
    0x94, 0x78, 0x59, 0x18, //
    0x8a, 0x9b, 0x31, 0xe7, //
    0x4d, 0xed, 0x1d, 0x29,
];

/// Argon2 flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashVariant {
    Argon2d,
    #[default]
    Argon2i,
    Argon2id,
}

impl From<HashVariant> for Algorithm {
    fn from(variant: HashVariant) -> Self {
        match variant {
            HashVariant::Argon2d => Algorithm::Argon2d,
            HashVariant::Argon2i => Algorithm::Argon2i,
            HashVariant::Argon2id => Algorithm::Argon2id,
        }
    }
}

/// Immutable memory-hard hash configuration shared by every derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    /// Iterations
    #[serde(default = "default_t_cost")]
    pub t_cost: u32,

    /// Memory in KiB
    #[serde(default = "default_m_cost")]
    pub m_cost: u32,

    /// Lanes
    #[serde(default = "default_p_cost")]
    pub p_cost: u32,

    /// Output length in bytes (must be 96)
    #[serde(default = "default_output_len")]
    pub output_len: usize,

    #[serde(default)]
    pub variant: HashVariant,

    /// Argon2 version tag, 0x10 or 0x13
    #[serde(default = "default_version")]
    pub version: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            t_cost: DEFAULT_T_COST,
            m_cost: DEFAULT_M_COST,
            p_cost: DEFAULT_P_COST,
            output_len: HASH_OUTPUT_LEN,
            variant: HashVariant::default(),
            version: default_version(),
        }
    }
}

fn default_t_cost() -> u32 {
    DEFAULT_T_COST
}

fn default_m_cost() -> u32 {
    DEFAULT_M_COST
}

fn default_p_cost() -> u32 {
    DEFAULT_P_COST
}

fn default_output_len() -> usize {
    HASH_OUTPUT_LEN
}

fn default_version() -> u32 {
    0x13
}

impl HashConfig {
    /// Build argon2 parameters, rejecting anything the derivation layout can't use.
    pub fn params(&self) -> Result<Params, HashError> {
        if self.output_len != HASH_OUTPUT_LEN {
            return Err(HashError::InvalidParams(format!(
                "output length must be {} bytes, got {}",
                HASH_OUTPUT_LEN, self.output_len
            )));
        }
        Params::new(self.m_cost, self.t_cost, self.p_cost, Some(self.output_len))
            .map_err(|e| HashError::InvalidParams(e.to_string()))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.variant.into()
    }

    pub fn argon2_version(&self) -> Result<Version, HashError> {
        Version::try_from(self.version)
            .map_err(|_| HashError::InvalidParams(format!("unknown version {:#x}", self.version)))
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<(), HashError> {
        self.params()?;
        self.argon2_version()?;
        Ok(())
    }
}
