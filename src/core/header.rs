//! Block header: chain linkage, commitments, and the proof-of-work fields.

use crate::core::policy::BLOCK_TARGET_MAX;
use crate::core::target::{compact_to_target, is_proof_of_work, U256};
use crate::types::hash::Hash;
use lightchain_derive::BinaryCodec;

/// Serialized size of a header in bytes: four hashes and four u32 fields.
pub const HEADER_SIZE: usize = 4 * 32 + 4 * 4;

/// Immutable block header.
///
/// The hash of the serialized header identifies the block and is the value
/// the proof-of-work predicate is evaluated on. Fields serialize in
/// declaration order.
#[derive(Clone, Debug, PartialEq, Eq, BinaryCodec)]
pub struct BlockHeader {
    /// Hash of the parent block's header.
    pub prev_hash: Hash,
    /// Commitment to the block's interlink.
    pub interlink_hash: Hash,
    /// Commitment to the block's body.
    pub body_hash: Hash,
    /// Root of the accounts tree after applying this block.
    pub accounts_hash: Hash,
    /// Compact difficulty target.
    pub n_bits: u32,
    /// Chain height; genesis is 1.
    pub height: u32,
    /// Seconds since the Unix epoch.
    pub timestamp: u32,
    /// Proof-of-work nonce.
    pub nonce: u32,
}

impl BlockHeader {
    /// Computes the identifying hash of this header.
    pub fn hash(&self) -> Hash {
        Hash::of(self)
    }

    /// Expands the compact `n_bits` field into the full 256-bit target.
    pub fn target(&self) -> U256 {
        compact_to_target(self.n_bits)
    }

    /// Returns the difficulty of this header's target. A zero target yields
    /// zero difficulty.
    pub fn difficulty(&self) -> U256 {
        BLOCK_TARGET_MAX.checked_div(self.target()).unwrap_or_default()
    }

    /// Checks that the header hash meets the header's own target.
    pub fn verify_proof_of_work(&self) -> bool {
        is_proof_of_work(&self.hash(), &self.target())
    }
}
