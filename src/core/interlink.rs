//! Block interlink: the ordered back-pointers behind succinct chain proofs.

use crate::types::encoding::{Decode, DecodeError, Encode, EncodeSink};
use crate::types::hash::Hash;

/// Ordered list of ancestor hashes carried by every block.
///
/// Entry 0 of a produced interlink is always the genesis hash; the following
/// entries point at progressively more recent ancestors whose hashes cleared
/// progressively harder targets. The genesis block itself carries an empty
/// interlink, the base case of the construction.
///
/// On the wire: a u8 length followed by the raw hashes. Equality is
/// element-wise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockInterlink {
    hashes: Vec<Hash>,
}

impl BlockInterlink {
    /// Creates an interlink over the given ordered hashes.
    pub fn new(hashes: Vec<Hash>) -> Self {
        Self { hashes }
    }

    /// Returns the ordered hashes.
    pub fn hashes(&self) -> &[Hash] {
        &self.hashes
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Returns true if the interlink has no entries.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Computes the commitment to the ordered list, as referenced by
    /// [`crate::core::header::BlockHeader::interlink_hash`].
    pub fn hash(&self) -> Hash {
        Hash::of(self)
    }
}

impl Encode for BlockInterlink {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        debug_assert!(self.hashes.len() <= u8::MAX as usize);
        (self.hashes.len() as u8).encode(out);
        for hash in &self.hashes {
            hash.encode(out);
        }
    }
}

impl Decode for BlockInterlink {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let len = u8::decode(input)? as usize;
        let mut hashes = Vec::with_capacity(len);
        for _ in 0..len {
            hashes.push(Hash::decode(input)?);
        }
        Ok(Self { hashes })
    }
}
