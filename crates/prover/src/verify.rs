//! Proof verification.
//!
//! Total over well-typed input: a wrong leaf, root or proof length only
//! changes the folded value, so every mismatch is `false`. Each proof entry
//! costs exactly one `combine` and no allocation, so the same loop can be
//! re-implemented bit-exactly in a metered environment.

use symmerkle_core::{combine, HashPrimitive, LeafValue, MerkleProof};

/// Fold `proof` against `leaf` and compare with `root`.
pub fn verify_proof<H: HashPrimitive + ?Sized>(
    hasher: &H,
    root: &LeafValue,
    leaf: &LeafValue,
    proof: &MerkleProof,
) -> bool {
    fold_proof(hasher, leaf, proof) == *root
}

/// The root implied by `leaf` and `proof`.
pub fn fold_proof<H: HashPrimitive + ?Sized>(
    hasher: &H,
    leaf: &LeafValue,
    proof: &MerkleProof,
) -> LeafValue {
    proof
        .iter()
        .fold(*leaf, |h, sibling| combine(hasher, sibling, &h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::{build_root, generate_proof};
    use symmerkle_core::{hash_leaf, Keccak256Hasher, Sha256Hasher};

    fn leaves(n: usize) -> Vec<LeafValue> {
        (0..n)
            .map(|i| hash_leaf(&Sha256Hasher, &[i as u8]))
            .collect()
    }

    #[test]
    fn test_empty_proof_checks_leaf_against_root() {
        let leaf = LeafValue::from_u64(9);
        assert!(verify_proof(&Keccak256Hasher, &leaf, &leaf, &MerkleProof::default()));
        assert!(!verify_proof(
            &Keccak256Hasher,
            &LeafValue::from_u64(8),
            &leaf,
            &MerkleProof::default()
        ));
    }

    #[test]
    fn test_valid_proof() {
        let l = leaves(7);
        let root = build_root(&Sha256Hasher, &l).unwrap();
        let proof = generate_proof(&Sha256Hasher, &l, 3).unwrap();
        assert!(verify_proof(&Sha256Hasher, &root, &l[3], &proof));
        assert_eq!(fold_proof(&Sha256Hasher, &l[3], &proof), root);
    }

    #[test]
    fn test_wrong_root_rejected() {
        let l = leaves(4);
        let proof = generate_proof(&Sha256Hasher, &l, 0).unwrap();
        assert!(!verify_proof(&Sha256Hasher, &LeafValue::from_u64(1), &l[0], &proof));
    }

    #[test]
    fn test_truncated_proof_rejected() {
        let l = leaves(8);
        let root = build_root(&Sha256Hasher, &l).unwrap();
        let mut proof = generate_proof(&Sha256Hasher, &l, 5).unwrap();
        proof.siblings.pop();
        assert!(!verify_proof(&Sha256Hasher, &root, &l[5], &proof));
    }

    #[test]
    fn test_extended_proof_rejected() {
        let l = leaves(8);
        let root = build_root(&Sha256Hasher, &l).unwrap();
        let mut proof = generate_proof(&Sha256Hasher, &l, 5).unwrap();
        proof.siblings.push(LeafValue::SENTINEL);
        assert!(!verify_proof(&Sha256Hasher, &root, &l[5], &proof));
    }

    #[test]
    fn test_wrong_hash_algorithm_rejected() {
        let l = leaves(4);
        let root = build_root(&Sha256Hasher, &l).unwrap();
        let proof = generate_proof(&Sha256Hasher, &l, 2).unwrap();
        assert!(!verify_proof(&Keccak256Hasher, &root, &l[2], &proof));
    }
}
