//! Value transfer signed by the sender.

use crate::crypto::key_pair::{PrivateKey, PublicKey};
use crate::types::address::Address;
use crate::types::hash::Hash;
use crate::types::signature::SerializableSignature;
use lightchain_derive::BinaryCodec;

/// Serialized size of a transaction in bytes.
pub const TRANSACTION_SIZE: usize = 32 + 20 + 8 + 8 + 4 + 64;

/// A signed transfer from the key holder to a recipient address.
///
/// Immutable after construction; the signature covers every field except
/// itself, bound by the sender's public key.
#[derive(Debug, Clone, PartialEq, Eq, BinaryCodec)]
pub struct Transaction {
    /// Sender's public key; the sender address derives from it.
    pub sender_pub_key: PublicKey,
    /// Receiving account.
    pub recipient: Address,
    /// Transferred amount in the smallest unit.
    pub value: u64,
    /// Fee paid to the block's miner.
    pub fee: u64,
    /// Monotonic per-sender counter preventing replay.
    pub nonce: u32,
    /// Schnorr signature over the signing digest.
    pub signature: SerializableSignature,
}

impl Transaction {
    /// Creates a new transaction signed with the given private key.
    pub fn new(
        recipient: Address,
        value: u64,
        fee: u64,
        nonce: u32,
        key: &PrivateKey,
    ) -> Self {
        let sender_pub_key = key.public_key();
        let digest = Self::signing_digest(&sender_pub_key, &recipient, value, fee, nonce);

        Transaction {
            sender_pub_key,
            recipient,
            value,
            fee,
            nonce,
            signature: key.sign(digest.as_slice()),
        }
    }

    /// Returns the address the value is drawn from, derived from the
    /// sender's public key.
    pub fn sender_address(&self) -> Address {
        self.sender_pub_key.address
    }

    /// Verifies the signature against the sender's public key.
    pub fn verify_signature(&self) -> bool {
        let digest = Self::signing_digest(
            &self.sender_pub_key,
            &self.recipient,
            self.value,
            self.fee,
            self.nonce,
        );
        self.sender_pub_key.verify(digest.as_slice(), self.signature)
    }

    /// Returns the transaction's identifying hash over the full
    /// serialization, used as its leaf in the body commitment.
    pub fn hash(&self) -> Hash {
        Hash::of(self)
    }

    /// Computes the digest the sender signs: every field except the
    /// signature, behind a domain separator.
    fn signing_digest(
        sender_pub_key: &PublicKey,
        recipient: &Address,
        value: u64,
        fee: u64,
        nonce: u32,
    ) -> Hash {
        use crate::types::encoding::Encode;

        let mut h = Hash::sha3();
        h.update(b"TX");
        sender_pub_key.encode(&mut h);
        recipient.encode(&mut h);
        value.encode(&mut h);
        fee.encode(&mut h);
        nonce.encode(&mut h);
        h.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::encoding::{Decode, Encode};

    fn sample_tx(key: &PrivateKey) -> Transaction {
        Transaction::new(Address([0x11; 20]), 1000, 1, 0, key)
    }

    #[test]
    fn new_transaction_verifies() {
        let key = PrivateKey::new();
        let tx = sample_tx(&key);
        assert!(tx.verify_signature());
    }

    #[test]
    fn sender_address_matches_key() {
        let key = PrivateKey::new();
        let tx = sample_tx(&key);
        assert_eq!(tx.sender_address(), key.public_key().address);
    }

    #[test]
    fn tampered_value_fails_verification() {
        let key = PrivateKey::new();
        let mut tx = sample_tx(&key);
        tx.value += 1;
        assert!(!tx.verify_signature());
    }

    #[test]
    fn tampered_recipient_fails_verification() {
        let key = PrivateKey::new();
        let mut tx = sample_tx(&key);
        tx.recipient = Address([0x22; 20]);
        assert!(!tx.verify_signature());
    }

    #[test]
    fn foreign_public_key_fails_verification() {
        let key = PrivateKey::new();
        let other = PrivateKey::new();
        let mut tx = sample_tx(&key);
        tx.sender_pub_key = other.public_key();
        assert!(!tx.verify_signature());
    }

    #[test]
    fn codec_roundtrip() {
        let key = PrivateKey::new();
        let tx = sample_tx(&key);

        let bytes = tx.to_bytes();
        assert_eq!(bytes.len(), TRANSACTION_SIZE);
        assert_eq!(tx.serialized_size(), TRANSACTION_SIZE);

        let decoded = Transaction::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, tx);
        assert!(decoded.verify_signature());
    }

    #[test]
    fn hash_covers_the_signature() {
        let key = PrivateKey::new();
        let a = Transaction::new(Address([0x11; 20]), 1000, 1, 0, &key);
        let b = Transaction::new(Address([0x11; 20]), 1000, 1, 1, &key);
        assert_ne!(a.hash(), b.hash());
        assert_eq!(a.hash(), a.hash());
    }
}
