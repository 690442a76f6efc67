//! Prover trait for pluggable commitment backends.
//!
//! The symmetric prover builds the XOR-then-hash tree described in
//! `merkle`. A host that publishes roots and checks claims only needs this
//! trait, so a different backend can be swapped in later.

use symmerkle_core::{LeafValue, MerkleProof, Result, TreeConfig};

use crate::merkle::{build_root_with_policy, generate_proof_with_policy};
use crate::verify::verify_proof;

/// Pluggable commitment prover.
///
/// `commit` and `prove` run off-chain; `verify` must stay total so it can be
/// handed untrusted proofs.
pub trait Prover: Send + Sync {
    /// Root over an ordered, nonempty leaf sequence.
    fn commit(&self, leaves: &[LeafValue]) -> Result<LeafValue>;

    /// Sibling path for `leaves[index]`.
    fn prove(&self, leaves: &[LeafValue], index: usize) -> Result<MerkleProof>;

    /// Check a claimed leaf against a published root.
    fn verify(&self, root: &LeafValue, leaf: &LeafValue, proof: &MerkleProof) -> bool;
}

/// Prover over the commutative pair hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetricProver {
    config: TreeConfig,
}

impl SymmetricProver {
    pub fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }
}

impl Prover for SymmetricProver {
    fn commit(&self, leaves: &[LeafValue]) -> Result<LeafValue> {
        build_root_with_policy(&self.config.hash_algorithm, leaves, self.config.sentinel_policy)
    }

    fn prove(&self, leaves: &[LeafValue], index: usize) -> Result<MerkleProof> {
        generate_proof_with_policy(
            &self.config.hash_algorithm,
            leaves,
            index,
            self.config.sentinel_policy,
        )
    }

    fn verify(&self, root: &LeafValue, leaf: &LeafValue, proof: &MerkleProof) -> bool {
        verify_proof(&self.config.hash_algorithm, root, leaf, proof)
    }
}
