//! Derivation paths
//!
//! A path is an ordered list of raw byte segments. Numeric indices are
//! encoded as 4-byte big-endian `u32` so the same index always maps to
//! the same segment.
//!
//! Text form: `m/0/1/0x00ff`. Decimal components are indices, `0x`
//! components are raw bytes (`0x` alone is an empty segment), and `m`
//! or an empty string is the root.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// Canonical encoding of a numeric path index.
pub fn index_segment(index: u32) -> [u8; 4] {
    index.to_be_bytes()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    segments: Vec<Vec<u8>>,
}

impl DerivationPath {
    /// The empty path, which resolves to the root key.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_indices(indices: &[u32]) -> Self {
        Self {
            segments: indices.iter().map(|&i| index_segment(i).to_vec()).collect(),
        }
    }

    pub fn from_segments<S: AsRef<[u8]>>(segments: &[S]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.as_ref().to_vec()).collect(),
        }
    }

    /// Append an index segment.
    pub fn child(&self, index: u32) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index_segment(index).to_vec());
        Self { segments }
    }

    pub fn segments(&self) -> &[Vec<u8>] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for DerivationPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rest = if s == "m" {
            ""
        } else {
            s.strip_prefix("m/").unwrap_or(s)
        };
        if rest.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for (pos, component) in rest.split('/').enumerate() {
            if component.is_empty() {
                return Err(PathError::EmptyComponent(pos));
            }
            let segment = if let Some(raw) = component.strip_prefix("0x") {
                hex::decode(raw).map_err(|_| PathError::InvalidHex(component.to_string()))?
            } else {
                let index: u32 = component
                    .parse()
                    .map_err(|_| PathError::InvalidIndex(component.to_string()))?;
                index_segment(index).to_vec()
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for segment in &self.segments {
            match <[u8; 4]>::try_from(segment.as_slice()) {
                Ok(be) => write!(f, "/{}", u32::from_be_bytes(be))?,
                Err(_) => write!(f, "/0x{}", hex::encode(segment))?,
            }
        }
        Ok(())
    }
}

impl AsRef<[Vec<u8>]> for DerivationPath {
    fn as_ref(&self) -> &[Vec<u8>] {
        &self.segments
    }
}
