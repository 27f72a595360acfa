//! The block aggregate: header, interlink, and body, with full validation
//! and the difficulty-aware interlink construction.

use crate::core::body::BlockBody;
use crate::core::header::BlockHeader;
use crate::core::interlink::BlockInterlink;
use crate::core::policy;
use crate::core::target::{is_proof_of_work, target_height, U256};
use crate::types::address::Address;
use crate::types::encoding::Encode;
use crate::types::hash::Hash;
use crate::utils::log::Logger;
use lightchain_derive::{BinaryCodec, Error};
use std::collections::HashSet;
use std::sync::LazyLock;

/// The process-wide genesis block, mined at difficulty 1.
static GENESIS: LazyLock<Block> = LazyLock::new(|| {
    let body = BlockBody::new(policy::GENESIS_MINER, vec![]);
    let interlink = BlockInterlink::new(vec![]);
    let header = BlockHeader {
        prev_hash: Hash::zero(),
        interlink_hash: interlink.hash(),
        body_hash: body.hash(),
        accounts_hash: Hash::zero(),
        n_bits: policy::GENESIS_NBITS,
        height: 1,
        timestamp: policy::GENESIS_TIMESTAMP,
        nonce: policy::GENESIS_NONCE,
    };
    Block::new(header, interlink, body)
});

/// Hash of the genesis block, computed once.
static GENESIS_HASH: LazyLock<Hash> = LazyLock::new(|| GENESIS.hash());

/// Reasons a block fails validation. `verify` reports the first failing rule
/// at warn level and returns `false`; rule violations never surface as
/// errors to the caller.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("block of {size} bytes exceeds the {limit} byte limit")]
    Oversized { size: usize, limit: usize },

    #[error("more than one transaction from sender {address}")]
    DuplicateSender { address: Address },

    #[error("transaction from {address} pays its own sender")]
    SelfTransfer { address: Address },

    #[error("header hash does not meet the declared target")]
    InsufficientPow,

    #[error("body commitment does not match the header")]
    BodyHashMismatch,

    #[error("interlink commitment does not match the header")]
    InterlinkHashMismatch,

    #[error("invalid signature on transaction from {address}")]
    InvalidTransactionSignature { address: Address },
}

/// An immutable block.
///
/// Blocks are assembled from already-typed parts, so a structurally malformed
/// block is unrepresentable; content rules are enforced by [`Block::verify`].
/// On the wire a block is the concatenation `header || interlink || body`.
#[derive(Debug, Clone, PartialEq, Eq, BinaryCodec)]
pub struct Block {
    pub header: BlockHeader,
    pub interlink: BlockInterlink,
    pub body: BlockBody,
}

impl Block {
    /// Creates a block from its parts. No rules are checked here; callers
    /// run [`Block::verify`] before treating the block as valid.
    pub fn new(header: BlockHeader, interlink: BlockInterlink, body: BlockBody) -> Self {
        Self {
            header,
            interlink,
            body,
        }
    }

    /// Returns the process-wide genesis block.
    pub fn genesis() -> &'static Block {
        &GENESIS
    }

    /// Returns the genesis block's hash without recomputing it.
    pub fn genesis_hash() -> Hash {
        *GENESIS_HASH
    }

    /// Returns the block's identifying hash, the hash of its header.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Checks every intrinsic validity rule of this block.
    ///
    /// The check set is pure and depends only on the block's own content, so
    /// distinct blocks verify independently. The work is offloaded to the
    /// blocking pool; signature verification dominates the cost. Returns
    /// `false` on the first failing rule, logged at warn level.
    pub async fn verify(&self, logger: &Logger) -> bool {
        let block = self.clone();
        let logger = logger.clone();
        tokio::task::spawn_blocking(move || match block.validate() {
            Ok(()) => true,
            Err(reason) => {
                logger.warn(&format!("rejecting block {}: {}", block.hash(), reason));
                false
            }
        })
        .await
        .unwrap_or(false)
    }

    /// Runs the validation rules in their fixed order and reports the first
    /// violation. The order is part of the contract: the reported reason is
    /// deterministic and replayable.
    fn validate(&self) -> Result<(), BlockError> {
        let size = self.serialized_size();
        if size > policy::BLOCK_SIZE_MAX {
            return Err(BlockError::Oversized {
                size,
                limit: policy::BLOCK_SIZE_MAX,
            });
        }

        // At most one transaction per sender per block. Keyed on the raw
        // public key bytes; no derivation happens here.
        let mut senders = HashSet::with_capacity(self.body.transactions().len());
        for tx in self.body.transactions() {
            if !senders.insert(tx.sender_pub_key.to_bytes()) {
                return Err(BlockError::DuplicateSender {
                    address: tx.sender_address(),
                });
            }
        }

        for tx in self.body.transactions() {
            if tx.recipient == tx.sender_address() {
                return Err(BlockError::SelfTransfer {
                    address: tx.recipient,
                });
            }
        }

        if !self.header.verify_proof_of_work() {
            return Err(BlockError::InsufficientPow);
        }

        if self.header.body_hash != self.body.hash() {
            return Err(BlockError::BodyHashMismatch);
        }

        if self.header.interlink_hash != self.interlink.hash() {
            return Err(BlockError::InterlinkHashMismatch);
        }

        for tx in self.body.transactions() {
            if !tx.verify_signature() {
                return Err(BlockError::InvalidTransactionSignature {
                    address: tx.sender_address(),
                });
            }
        }

        Ok(())
    }

    /// Checks whether this block is a valid direct child of `prev`.
    ///
    /// Height must increase by one, the timestamp must not decrease, the
    /// parent hash must match, and the interlink commitment must equal the
    /// parent's interlink retargeted to *this* block's target. Intrinsic
    /// validity of either block is not re-checked here.
    pub fn is_successor_of(&self, prev: &Block) -> bool {
        if prev.header.height.checked_add(1) != Some(self.header.height) {
            return false;
        }

        if self.header.timestamp < prev.header.timestamp {
            return false;
        }

        if self.header.prev_hash != prev.hash() {
            return false;
        }

        let expected = prev.next_interlink(self.header.target());
        self.header.interlink_hash == expected.hash()
    }

    /// Computes the interlink a direct child mining at `next_target`
    /// inherits from this block.
    ///
    /// The depth is the number of power-of-two levels below the next target
    /// height that this block's hash clears. When the hash clears no extra
    /// level and the target height is unchanged, the interlink passes through
    /// untouched. Otherwise the child's interlink is rebuilt: the genesis
    /// hash, this block's hash once per cleared level, then the tail of the
    /// current interlink starting at `depth + offset + 1`, where `offset` is
    /// the (possibly negative) change in target height.
    pub fn next_interlink(&self, next_target: U256) -> BlockInterlink {
        let hash = self.hash();
        let cur_height = target_height(self.header.target());
        let next_height = target_height(next_target);

        let mut depth: u32 = 0;
        while depth < next_height
            && is_proof_of_work(&hash, &(U256::one() << ((next_height - depth - 1) as usize)))
        {
            depth += 1;
        }

        if depth == 0 && cur_height == next_height {
            return self.interlink.clone();
        }

        let mut hashes = Vec::with_capacity(1 + depth as usize + self.interlink.len());
        hashes.push(Self::genesis_hash());
        for _ in 0..depth {
            hashes.push(hash);
        }

        let offset = cur_height as i64 - next_height as i64;
        let tail_start = depth as i64 + offset + 1;
        if tail_start < self.interlink.len() as i64 {
            let start = tail_start.max(0) as usize;
            hashes.extend_from_slice(&self.interlink.hashes()[start..]);
        }

        BlockInterlink::new(hashes)
    }
}
