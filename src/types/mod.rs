//! Value types and the serialization framework.
//!
//! - `encoding`: `Encode`/`Decode` traits and the big-endian wire codecs
//! - `bytes`: reference-counted byte buffer used for encoded output
//! - `hash`: 32-byte SHA3-256 hash with base64 I/O
//! - `address`: 20-byte account address
//! - `signature`: Schnorr signature wrapper wired into the codec
//! - `merkle_tree`: deterministic Merkle roots for body commitments

pub mod address;
pub mod bytes;
pub mod encoding;
pub mod hash;
pub mod merkle_tree;
pub mod signature;
