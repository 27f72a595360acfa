//! Consensus policy constants.

use crate::core::target::U256;
use crate::types::address::Address;

/// Hard upper bound on the serialized size of one block, in bytes.
pub const BLOCK_SIZE_MAX: usize = 1_000_000;

/// Easiest admissible target, 2^240. Difficulty is measured against this
/// ceiling: `difficulty = BLOCK_TARGET_MAX / target`.
pub const BLOCK_TARGET_MAX: U256 = U256([0, 0, 0, 0x0001_0000_0000_0000]);

/// Compact form of [`BLOCK_TARGET_MAX`]; the genesis block mines at
/// difficulty 1.
pub const GENESIS_NBITS: u32 = 0x1f01_0000;

/// Nonce satisfying the proof of work for the genesis header.
pub const GENESIS_NONCE: u32 = 31_694;

/// Timestamp of the genesis block, seconds since the Unix epoch.
pub const GENESIS_TIMESTAMP: u32 = 0;

/// Miner address credited in the genesis body.
pub const GENESIS_MINER: Address = Address([0u8; 20]);
