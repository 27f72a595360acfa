//! Deterministic Merkle roots for commitment hashes.
//!
//! The tree is implied, never materialized: each round chunks the current
//! level into pairs and hashes them into the next level until one node
//! remains. A level with an odd node count pairs its last node with itself.
//! An empty leaf list commits to the all-zero hash.

use crate::types::hash::Hash;

const NODE_TAG: &[u8] = b"MERKLE_NODE";

/// Computes the Merkle root of the given leaves.
///
/// Returns the zero hash for no leaves and the leaf itself for a single
/// leaf. Interior nodes are domain-tagged, so a leaf can never be confused
/// with a combined node.
pub fn root(leaves: Vec<Hash>) -> Hash {
    if leaves.is_empty() {
        return Hash::zero();
    }

    let mut level = leaves;
    while level.len() > 1 {
        let parents = level
            .chunks(2)
            .map(|pair| combine(&pair[0], pair.get(1).unwrap_or(&pair[0])))
            .collect();
        level = parents;
    }
    level[0]
}

fn combine(left: &Hash, right: &Hash) -> Hash {
    let mut h = Hash::sha3();
    h.update(NODE_TAG);
    h.update(left.as_slice());
    h.update(right.as_slice());
    h.finalize()
}
