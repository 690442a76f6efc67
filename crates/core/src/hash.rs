//! Hash primitives and the commutative pair hash.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sha3::Keccak256;

use crate::{LeafValue, SymMerkleError, WORD_BYTES};

/// Fixed-output hash mapping a byte string to a 256-bit word.
pub trait HashPrimitive {
    fn hash(&self, data: &[u8]) -> [u8; WORD_BYTES];
}

/// Keccak-256 as used by the EVM (`keccak256`), not NIST SHA3-256.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keccak256Hasher;

impl HashPrimitive for Keccak256Hasher {
    fn hash(&self, data: &[u8]) -> [u8; WORD_BYTES] {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl HashPrimitive for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> [u8; WORD_BYTES] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

/// Runtime selection of the hash primitive.
///
/// Provers and verifiers must agree on this value; proofs built with one
/// algorithm never verify under the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// EVM-compatible, matches an on-chain `keccak256(abi.encodePacked(a ^ b))`
    #[default]
    Keccak256,
    Sha256,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keccak256 => "keccak256",
            Self::Sha256 => "sha256",
        }
    }
}

impl HashPrimitive for HashAlgorithm {
    fn hash(&self, data: &[u8]) -> [u8; WORD_BYTES] {
        match self {
            Self::Keccak256 => Keccak256Hasher.hash(data),
            Self::Sha256 => Sha256Hasher.hash(data),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = SymMerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak256" | "keccak" => Ok(Self::Keccak256),
            "sha256" => Ok(Self::Sha256),
            other => Err(SymMerkleError::InvalidInput(format!(
                "unknown hash algorithm: {}",
                other
            ))),
        }
    }
}

/// Hash arbitrary bytes into a leaf value.
///
/// Convenience for producing `H(record)` leaves; record encoding is the
/// caller's concern.
pub fn hash_leaf<H: HashPrimitive + ?Sized>(hasher: &H, data: &[u8]) -> LeafValue {
    LeafValue::from_bytes(hasher.hash(data))
}

/// Commutative pair hash: `H(bytes(a XOR b))`.
///
/// `combine(a, b) == combine(b, a)` for every pair, which is what lets a
/// proof omit direction bits. Note `combine(a, a)` is `H(0)` for every `a`.
pub fn combine<H: HashPrimitive + ?Sized>(hasher: &H, a: &LeafValue, b: &LeafValue) -> LeafValue {
    LeafValue::from_bytes(hasher.hash(a.xor(b).as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KECCAK_ZERO_WORD: &str =
        "0x290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563";
    const SHA256_ZERO_WORD: &str =
        "0x66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925";

    #[test]
    fn test_keccak_empty_input() {
        let digest = Keccak256Hasher.hash(b"");
        assert_eq!(
            hex::encode(digest),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sha256_empty_input() {
        let digest = Sha256Hasher.hash(b"");
        assert_eq!(
            hex::encode(digest),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_algorithm_dispatch() {
        assert_eq!(HashAlgorithm::Keccak256.hash(b"a"), Keccak256Hasher.hash(b"a"));
        assert_eq!(HashAlgorithm::Sha256.hash(b"a"), Sha256Hasher.hash(b"a"));
        assert_ne!(HashAlgorithm::Keccak256.hash(b"a"), HashAlgorithm::Sha256.hash(b"a"));
    }

    #[test]
    fn test_combine_commutes() {
        let a = hash_leaf(&Keccak256Hasher, b"a");
        let b = hash_leaf(&Keccak256Hasher, b"b");
        assert_eq!(combine(&Keccak256Hasher, &a, &b), combine(&Keccak256Hasher, &b, &a));
        assert_eq!(combine(&Sha256Hasher, &a, &b), combine(&Sha256Hasher, &b, &a));
    }

    #[test]
    fn test_combine_is_hash_of_xor() {
        let a = LeafValue::from_u64(0xF0);
        let b = LeafValue::from_u64(0x0F);
        let expected = Keccak256Hasher.hash(LeafValue::from_u64(0xFF).as_bytes());
        assert_eq!(combine(&Keccak256Hasher, &a, &b).to_bytes(), expected);
    }

    #[test]
    fn test_combine_equal_inputs_hashes_zero_word() {
        let a = hash_leaf(&HashAlgorithm::Keccak256, b"x");
        assert_eq!(combine(&HashAlgorithm::Keccak256, &a, &a).to_hex(), KECCAK_ZERO_WORD);
        assert_eq!(combine(&HashAlgorithm::Sha256, &a, &a).to_hex(), SHA256_ZERO_WORD);
    }

    #[test]
    fn test_combine_with_sentinel_hashes_value() {
        let a = hash_leaf(&Sha256Hasher, b"y");
        let expected = hash_leaf(&Sha256Hasher, a.as_bytes());
        assert_eq!(combine(&Sha256Hasher, &a, &LeafValue::SENTINEL), expected);
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        assert_eq!("keccak256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Keccak256);
        assert_eq!("SHA256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert!("md5".parse::<HashAlgorithm>().is_err());
        assert_eq!(HashAlgorithm::Sha256.to_string(), "sha256");
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Keccak256);
    }

    #[test]
    fn test_algorithm_serde_lowercase() {
        let json = serde_json::to_string(&HashAlgorithm::Keccak256).unwrap();
        assert_eq!(json, "\"keccak256\"");
        let back: HashAlgorithm = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(back, HashAlgorithm::Sha256);
    }
}
