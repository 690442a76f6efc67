//! Layered Merkle tree over the commutative pair hash.
//!
//! Every layer with more than one node is right-padded with the sentinel
//! when odd, then folded pairwise. Builder and proof generator apply the
//! padding at the same layer boundary so they stay in lock-step.

use tracing::{debug, trace};

use symmerkle_core::{
    combine, HashAlgorithm, HashPrimitive, LeafValue, MerkleProof, Result, SentinelPolicy,
    SymMerkleError, TreeConfig,
};

use crate::verify::verify_proof;

/// Number of folding steps (and proof entries) for `leaf_count` leaves.
///
/// Equals `ceil(log2(n))`; a single leaf needs no folding.
pub fn expected_proof_len(leaf_count: usize) -> usize {
    let mut len = leaf_count;
    let mut steps = 0;
    while len > 1 {
        len = (len + 1) / 2;
        steps += 1;
    }
    steps
}

/// Reduce a leaf sequence to its root.
///
/// A single leaf is its own root. Leaves equal to the sentinel are rejected.
pub fn build_root<H: HashPrimitive + ?Sized>(hasher: &H, leaves: &[LeafValue]) -> Result<LeafValue> {
    build_root_with_policy(hasher, leaves, SentinelPolicy::Reject)
}

pub fn build_root_with_policy<H: HashPrimitive + ?Sized>(
    hasher: &H,
    leaves: &[LeafValue],
    policy: SentinelPolicy,
) -> Result<LeafValue> {
    check_leaves(leaves, policy)?;

    let mut cur = leaves.to_vec();
    while cur.len() > 1 {
        pad_layer(&mut cur);
        cur = fold_layer(hasher, &cur);
    }

    debug!("Built root over {} leaves", leaves.len());
    Ok(cur[0])
}

/// Extract the sibling path for `leaves[index]`, leaf layer first.
pub fn generate_proof<H: HashPrimitive + ?Sized>(
    hasher: &H,
    leaves: &[LeafValue],
    index: usize,
) -> Result<MerkleProof> {
    generate_proof_with_policy(hasher, leaves, index, SentinelPolicy::Reject)
}

pub fn generate_proof_with_policy<H: HashPrimitive + ?Sized>(
    hasher: &H,
    leaves: &[LeafValue],
    index: usize,
    policy: SentinelPolicy,
) -> Result<MerkleProof> {
    check_leaves(leaves, policy)?;
    if index >= leaves.len() {
        return Err(SymMerkleError::IndexOutOfRange {
            index,
            len: leaves.len(),
        });
    }

    let mut siblings = Vec::with_capacity(expected_proof_len(leaves.len()));
    let mut cur = leaves.to_vec();
    let mut i = index;
    while cur.len() > 1 {
        pad_layer(&mut cur);
        siblings.push(sibling_at(&cur, i));
        i /= 2;
        cur = fold_layer(hasher, &cur);
    }

    debug!(
        "Generated proof for leaf {} of {} ({} siblings)",
        index,
        leaves.len(),
        siblings.len()
    );
    Ok(MerkleProof::new(siblings))
}

/// A fixed leaf set with every layer retained.
///
/// Layers are flat vectors addressed by index; odd layers are stored with
/// their sentinel pad. Any change to the leaves means building a new tree.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    config: TreeConfig,
    leaf_count: usize,
    /// layers[0] = padded leaves, last = [root]
    layers: Vec<Vec<LeafValue>>,
}

impl MerkleTree {
    /// Build with the given hash algorithm and the default sentinel policy.
    pub fn from_leaves(hash_algorithm: HashAlgorithm, leaves: &[LeafValue]) -> Result<Self> {
        Self::with_config(TreeConfig::new(hash_algorithm), leaves)
    }

    pub fn with_config(config: TreeConfig, leaves: &[LeafValue]) -> Result<Self> {
        check_leaves(leaves, config.sentinel_policy)?;

        let hasher = config.hash_algorithm;
        let mut layers = Vec::with_capacity(expected_proof_len(leaves.len()) + 1);
        let mut cur = leaves.to_vec();
        while cur.len() > 1 {
            pad_layer(&mut cur);
            let next = fold_layer(&hasher, &cur);
            trace!("Layer {}: {} nodes -> {}", layers.len(), cur.len(), next.len());
            layers.push(cur);
            cur = next;
        }
        layers.push(cur);

        let tree = Self {
            config,
            leaf_count: leaves.len(),
            layers,
        };
        debug!(
            "Built {} tree: {} leaves, depth {}, root {}",
            hasher,
            tree.leaf_count,
            tree.depth(),
            tree.root()
        );
        Ok(tree)
    }

    pub fn root(&self) -> LeafValue {
        // with_config always pushes the final single-node layer
        self.layers[self.layers.len() - 1][0]
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.config.hash_algorithm
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of folding steps, which is also the proof length.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// The original leaves, without padding.
    pub fn leaves(&self) -> &[LeafValue] {
        &self.layers[0][..self.leaf_count]
    }

    /// A stored layer including any sentinel pad. Layer 0 is the leaves.
    pub fn layer(&self, level: usize) -> Option<&[LeafValue]> {
        self.layers.get(level).map(|l| l.as_slice())
    }

    /// Proof for one leaf, read from the stored layers.
    pub fn proof(&self, index: usize) -> Result<MerkleProof> {
        if index >= self.leaf_count {
            return Err(SymMerkleError::IndexOutOfRange {
                index,
                len: self.leaf_count,
            });
        }

        let mut i = index;
        let siblings = self.layers[..self.depth()]
            .iter()
            .map(|layer| {
                let sibling = sibling_at(layer, i);
                i /= 2;
                sibling
            })
            .collect();
        Ok(MerkleProof::new(siblings))
    }

    /// Proofs for every leaf, in leaf order.
    pub fn proofs(&self) -> Vec<MerkleProof> {
        (0..self.leaf_count)
            .filter_map(|i| self.proof(i).ok())
            .collect()
    }

    pub fn verify(&self, leaf: &LeafValue, proof: &MerkleProof) -> bool {
        verify_proof(&self.config.hash_algorithm, &self.root(), leaf, proof)
    }
}

fn check_leaves(leaves: &[LeafValue], policy: SentinelPolicy) -> Result<()> {
    if leaves.is_empty() {
        return Err(SymMerkleError::InvalidInput(
            "leaf sequence is empty".to_string(),
        ));
    }
    if policy == SentinelPolicy::Reject {
        if let Some(pos) = leaves.iter().position(LeafValue::is_sentinel) {
            return Err(SymMerkleError::InvalidInput(format!(
                "leaf {} equals the padding sentinel",
                pos
            )));
        }
    }
    Ok(())
}

fn pad_layer(layer: &mut Vec<LeafValue>) {
    if layer.len() > 1 && layer.len() % 2 == 1 {
        layer.push(LeafValue::SENTINEL);
    }
}

/// Caller guarantees `layer` is padded to even length.
fn sibling_at(layer: &[LeafValue], i: usize) -> LeafValue {
    if i % 2 == 1 {
        layer[i - 1]
    } else {
        layer[i + 1]
    }
}

fn fold_layer<H: HashPrimitive + ?Sized>(hasher: &H, layer: &[LeafValue]) -> Vec<LeafValue> {
    layer
        .chunks_exact(2)
        .map(|pair| combine(hasher, &pair[0], &pair[1]))
        .collect()
}
