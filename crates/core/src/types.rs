use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{Result, SymMerkleError};

/// Width of a node value in bytes (W = 256 bits).
pub const WORD_BYTES: usize = 32;

/// A 256-bit unsigned integer stored as 32 big-endian bytes.
///
/// Leaves, interior nodes, roots and proof siblings all share this type.
/// Big-endian storage makes the byte string fed to the hash identical to the
/// ABI encoding of a `uint256`, and XOR over the integer is byte-wise XOR.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LeafValue([u8; WORD_BYTES]);

impl LeafValue {
    /// Right-padding for odd layers.
    pub const SENTINEL: LeafValue = LeafValue([0u8; WORD_BYTES]);

    pub const fn from_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - 8..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn from_u128(value: u128) -> Self {
        let mut bytes = [0u8; WORD_BYTES];
        bytes[WORD_BYTES - 16..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; WORD_BYTES] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; WORD_BYTES] {
        self.0
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }

    /// Bitwise XOR over the full 256-bit width.
    pub fn xor(&self, other: &LeafValue) -> LeafValue {
        let mut out = [0u8; WORD_BYTES];
        for (o, (a, b)) in out.iter_mut().zip(self.0.iter().zip(other.0.iter())) {
            *o = a ^ b;
        }
        LeafValue(out)
    }

    /// Parse a hex string with optional `0x` prefix.
    ///
    /// Shorter inputs are left-padded. Values that do not fit in 256 bits are
    /// rejected rather than truncated.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() {
            return Err(SymMerkleError::InvalidInput("empty hex value".to_string()));
        }

        let significant = digits.trim_start_matches('0');
        if significant.len() > WORD_BYTES * 2 {
            return Err(SymMerkleError::InvalidInput(format!(
                "value {} exceeds {} bits",
                s,
                WORD_BYTES * 8
            )));
        }

        let padded = format!("{:0>width$}", significant, width = WORD_BYTES * 2);
        let decoded = hex::decode(&padded)
            .map_err(|e| SymMerkleError::InvalidInput(format!("invalid hex {}: {}", s, e)))?;

        let mut bytes = [0u8; WORD_BYTES];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// `0x`-prefixed, 64 lowercase hex digits.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; WORD_BYTES]> for LeafValue {
    fn from(bytes: [u8; WORD_BYTES]) -> Self {
        Self(bytes)
    }
}

impl From<LeafValue> for [u8; WORD_BYTES] {
    fn from(value: LeafValue) -> Self {
        value.0
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LeafValue({})", self.to_hex())
    }
}

impl FromStr for LeafValue {
    type Err = SymMerkleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for LeafValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for LeafValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        LeafValue::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Membership proof: sibling values ordered leaf layer first, top layer last.
///
/// Carries no leaf index, leaf count or direction bits. On the wire it is the
/// plain concatenation of 32-byte words.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MerkleProof {
    pub siblings: Vec<LeafValue>,
}

impl MerkleProof {
    pub fn new(siblings: Vec<LeafValue>) -> Self {
        Self { siblings }
    }

    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LeafValue> {
        self.siblings.iter()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.siblings.len() * WORD_BYTES);
        for sibling in &self.siblings {
            out.extend_from_slice(sibling.as_bytes());
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % WORD_BYTES != 0 {
            return Err(SymMerkleError::InvalidInput(format!(
                "proof length {} is not a multiple of {}",
                bytes.len(),
                WORD_BYTES
            )));
        }

        let siblings = bytes
            .chunks_exact(WORD_BYTES)
            .map(|chunk| {
                let mut word = [0u8; WORD_BYTES];
                word.copy_from_slice(chunk);
                LeafValue(word)
            })
            .collect();
        Ok(Self { siblings })
    }
}

impl<'a> IntoIterator for &'a MerkleProof {
    type Item = &'a LeafValue;
    type IntoIter = std::slice::Iter<'a, LeafValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.siblings.iter()
    }
}
