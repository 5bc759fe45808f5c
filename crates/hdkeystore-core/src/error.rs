//! Error types for key derivation
//!
//! Leaf errors come from the two primitives (`HashError`, `KeyGenError`).
//! `StageError` is what a single hashing + key generation step reports,
//! and `DerivationError` tags a stage failure with the path level it
//! happened at.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("Invalid hash parameters: {0}")]
    InvalidParams(String),
    #[error("Hash computation failed: {0}")]
    Failed(String),
    #[error("Hash output is {actual} bytes, expected {expected}")]
    OutputLength { expected: usize, actual: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyGenError {
    #[error("Insufficient randomness: {0}")]
    InsufficientEntropy(String),
    #[error("Private key is {actual} bytes, expected {expected}")]
    PrivateKeyLength { expected: usize, actual: usize },
    #[error("Key generation failed: {0}")]
    Failed(String),
}

/// Failure of one hash + key generation step.
///
/// Wrapped errors are exposed through `source()`, not repeated in the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageError {
    #[error("could not compute hash")]
    Hash(#[from] HashError),
    #[error("could not generate private key")]
    KeyGen(#[from] KeyGenError),
    #[error("parent key material is {len} bytes, need at least {min}")]
    MalformedParent { len: usize, min: usize },
}

/// A path derivation that failed at `level` (zero-based).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not derive level {level} key")]
pub struct DerivationError {
    pub level: usize,
    #[source]
    pub cause: StageError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid hash configuration")]
    Config(#[source] HashError),
    #[error("could not generate root key")]
    RootKey(#[source] StageError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterialError {
    #[error("Key material is {len} bytes, need at least {min}")]
    TooShort { len: usize, min: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Empty path component at position {0}")]
    EmptyComponent(usize),
    #[error("Invalid index '{0}': expected a decimal u32")]
    InvalidIndex(String),
    #[error("Invalid hex component '{0}'")]
    InvalidHex(String),
}
