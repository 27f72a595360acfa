//! Block body: the miner's payout address and the ordered transactions.

use crate::core::transaction::Transaction;
use crate::types::address::Address;
use crate::types::encoding::{Decode, DecodeError, Encode, EncodeSink};
use crate::types::hash::Hash;
use crate::types::merkle_tree;

/// Payload of a block.
///
/// On the wire: the 20-byte miner address, a u16 transaction count, then
/// each transaction in order. Transaction order is significant; it feeds the
/// body commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockBody {
    /// Address credited with the block reward and fees.
    pub miner: Address,
    transactions: Box<[Transaction]>,
}

impl BlockBody {
    /// Creates a body over the given miner address and transactions.
    pub fn new(miner: Address, transactions: Vec<Transaction>) -> Self {
        Self {
            miner,
            transactions: transactions.into_boxed_slice(),
        }
    }

    /// Returns the transactions in consensus order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Computes the body commitment referenced by the header: the Merkle
    /// root over the miner address hash followed by the transaction hashes.
    pub fn hash(&self) -> Hash {
        let mut leaves = Vec::with_capacity(1 + self.transactions.len());
        leaves.push(Hash::of(&self.miner));
        leaves.extend(self.transactions.iter().map(Transaction::hash));
        merkle_tree::root(leaves)
    }
}

impl Encode for BlockBody {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        debug_assert!(self.transactions.len() <= u16::MAX as usize);
        self.miner.encode(out);
        (self.transactions.len() as u16).encode(out);
        for tx in self.transactions.iter() {
            tx.encode(out);
        }
    }
}

impl Decode for BlockBody {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let miner = Address::decode(input)?;
        let count = u16::decode(input)? as usize;
        let mut transactions = Vec::with_capacity(count);
        for _ in 0..count {
            transactions.push(Transaction::decode(input)?);
        }
        Ok(Self {
            miner,
            transactions: transactions.into_boxed_slice(),
        })
    }
}
