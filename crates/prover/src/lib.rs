//! SymMerkle Prover
//!
//! Merkle tree construction, proof generation and proof verification over
//! the commutative XOR-then-hash pair combiner.
//!
//! Roots are published by an external ledger and proofs are checked by
//! `verify_proof`, which is total and allocation-free per entry so that it
//! can be re-implemented bit-exactly inside a metered verifier. Trees are
//! never updated in place; a changed leaf set means a full rebuild.

pub mod merkle;
pub mod parallel;
pub mod traits;
pub mod verify;

pub use merkle::{
    build_root, build_root_with_policy, expected_proof_len, generate_proof,
    generate_proof_with_policy, MerkleTree,
};
pub use parallel::build_roots;
pub use traits::{Prover, SymmetricProver};
pub use verify::{fold_proof, verify_proof};
