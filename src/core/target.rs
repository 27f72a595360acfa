//! Difficulty target arithmetic and the proof-of-work predicate.
//!
//! Targets are 256-bit unsigned integers. A block hash meets a target when,
//! read big-endian, it is numerically less than or equal to the target.
//! Headers carry targets in the compact `nBits` form: one exponent byte
//! followed by three mantissa bytes.

use crate::core::policy::BLOCK_TARGET_MAX;
use crate::types::hash::Hash;
use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer used for targets and difficulties.
    pub struct U256(4);
}

/// Expands a compact `nBits` value into a full 256-bit target.
///
/// Encodings whose mantissa would shift past 256 bits, and encodings with a
/// zero mantissa, expand to the zero target, which no hash can meet.
pub fn compact_to_target(n_bits: u32) -> U256 {
    let exponent = (n_bits >> 24) as usize;
    let mantissa = U256::from(n_bits & 0x00ff_ffff);
    if mantissa.is_zero() {
        return U256::zero();
    }
    if exponent <= 3 {
        mantissa >> (8 * (3 - exponent))
    } else {
        let shift = 8 * (exponent - 3);
        if mantissa.bits() + shift > 256 {
            return U256::zero();
        }
        mantissa << shift
    }
}

/// Compresses a target into its compact `nBits` form.
///
/// The encoding keeps the three most significant bytes; lower bytes are
/// truncated. A mantissa with its high bit set is shifted down one byte so
/// the encoding round-trips through [`compact_to_target`].
pub fn target_to_compact(target: U256) -> u32 {
    if target.is_zero() {
        return 0;
    }
    let mut size = (target.bits() + 7) / 8;
    let mut mantissa = if size <= 3 {
        target.low_u32() << (8 * (3 - size))
    } else {
        (target >> (8 * (size - 3))).low_u32()
    };
    if mantissa & 0x0080_0000 != 0 {
        mantissa >>= 8;
        size += 1;
    }
    mantissa | ((size as u32) << 24)
}

/// Returns the height of a target: the ceiling of its base-2 logarithm.
///
/// Smaller height means a harder target. The zero target has height 0.
pub fn target_height(target: U256) -> u32 {
    if target.is_zero() {
        return 0;
    }
    let bits = target.bits() as u32;
    if (target & (target - U256::one())).is_zero() {
        // exact power of two
        bits - 1
    } else {
        bits
    }
}

/// The proof-of-work predicate: the hash, read big-endian, is numerically
/// less than or equal to the target.
pub fn is_proof_of_work(hash: &Hash, target: &U256) -> bool {
    U256::from_big_endian(hash.as_slice()) <= *target
}

/// Converts a compact target to its difficulty, the ratio of the policy
/// ceiling to the expanded target. Zero targets yield zero difficulty.
pub fn compact_to_difficulty(n_bits: u32) -> U256 {
    BLOCK_TARGET_MAX
        .checked_div(compact_to_target(n_bits))
        .unwrap_or_default()
}

/// Converts a difficulty to the compact form of its target. Zero difficulty
/// yields the zero compact value.
pub fn difficulty_to_compact(difficulty: U256) -> u32 {
    target_to_compact(
        BLOCK_TARGET_MAX
            .checked_div(difficulty)
            .unwrap_or_default(),
    )
}
