//! Building many independent trees at once.
//!
//! Trees over disjoint leaf sets share nothing, so with the `parallel`
//! feature each one is built on the rayon pool. Results keep input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use symmerkle_core::{HashPrimitive, LeafValue, Result};

use crate::merkle::build_root;

/// Root of every leaf set, in input order.
pub fn build_roots<H>(hasher: &H, leaf_sets: &[Vec<LeafValue>]) -> Vec<Result<LeafValue>>
where
    H: HashPrimitive + Sync + ?Sized,
{
    debug!("Building {} independent roots", leaf_sets.len());

    #[cfg(feature = "parallel")]
    let roots = leaf_sets
        .par_iter()
        .map(|leaves| build_root(hasher, leaves))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let roots = leaf_sets
        .iter()
        .map(|leaves| build_root(hasher, leaves))
        .collect();

    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use symmerkle_core::{hash_leaf, HashAlgorithm, SymMerkleError};

    #[test]
    fn test_build_roots_keeps_order() {
        let sets: Vec<Vec<LeafValue>> = (1..=12)
            .map(|n| {
                (0..n)
                    .map(|i| hash_leaf(&HashAlgorithm::Keccak256, format!("{}-{}", n, i).as_bytes()))
                    .collect()
            })
            .collect();

        let roots = build_roots(&HashAlgorithm::Keccak256, &sets);
        assert_eq!(roots.len(), sets.len());
        for (leaves, root) in sets.iter().zip(roots) {
            assert_eq!(root.unwrap(), build_root(&HashAlgorithm::Keccak256, leaves).unwrap());
        }
    }

    #[test]
    fn test_build_roots_reports_per_set_errors() {
        let sets = vec![vec![LeafValue::from_u64(1)], Vec::new()];
        let roots = build_roots(&HashAlgorithm::Sha256, &sets);
        assert_eq!(roots[0], Ok(LeafValue::from_u64(1)));
        assert!(matches!(roots[1], Err(SymMerkleError::InvalidInput(_))));
    }
}
