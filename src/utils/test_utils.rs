//! Helpers shared by the consensus test suites.

#[cfg(test)]
pub mod utils {
    use crate::core::block::Block;
    use crate::core::body::BlockBody;
    use crate::core::header::BlockHeader;
    use crate::core::target::{compact_to_target, is_proof_of_work, target_height, U256};
    use crate::core::transaction::Transaction;
    use crate::crypto::key_pair::PrivateKey;
    use crate::types::address::Address;
    use crate::types::hash::Hash;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    /// Returns an arbitrary hash no other call has returned: each call
    /// digests the next value of a process-wide counter.
    pub fn random_hash() -> Hash {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Hash::of(&n)
    }

    /// Builds a signed transfer of `value` to a fixed recipient.
    pub fn signed_tx(key: &PrivateKey, value: u64) -> Transaction {
        Transaction::new(Address([0x11; 20]), value, 1, 0, key)
    }

    /// Grinds the nonce until the header meets its own target.
    pub fn mine(header: &mut BlockHeader) {
        while !header.verify_proof_of_work() {
            header.nonce = header.nonce.wrapping_add(1);
        }
    }

    /// Number of power-of-two levels below `height` the hash clears.
    fn depth_of(hash: &Hash, height: u32) -> u32 {
        let mut depth = 0;
        while depth < height
            && is_proof_of_work(hash, &(U256::one() << ((height - depth - 1) as usize)))
        {
            depth += 1;
        }
        depth
    }

    /// Grinds the nonce until the header meets its own target and its hash
    /// clears exactly `depth` levels below the target height.
    pub fn mine_to_depth(header: &mut BlockHeader, depth: u32) {
        let target = header.target();
        let height = target_height(target);
        loop {
            let hash = header.hash();
            if is_proof_of_work(&hash, &target) && depth_of(&hash, height) == depth {
                return;
            }
            header.nonce = header.nonce.wrapping_add(1);
        }
    }

    /// Builds a fully valid direct child of `prev` carrying the given
    /// transactions, mined at the parent's difficulty without clearing
    /// extra interlink levels.
    pub fn next_block(prev: &Block, transactions: Vec<Transaction>) -> Block {
        let n_bits = prev.header.n_bits;
        let interlink = prev.next_interlink(compact_to_target(n_bits));
        let body = BlockBody::new(Address([0x42; 20]), transactions);
        let mut header = BlockHeader {
            prev_hash: prev.hash(),
            interlink_hash: interlink.hash(),
            body_hash: body.hash(),
            accounts_hash: random_hash(),
            n_bits,
            height: prev.header.height + 1,
            timestamp: prev.header.timestamp + 1,
            nonce: 0,
        };
        mine_to_depth(&mut header, 0);
        Block::new(header, interlink, body)
    }
}
