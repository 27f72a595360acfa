//! 32-byte SHA3-256 hash type with zero-allocation hashing of encoded records.

use crate::types::encoding::{take, Decode, DecodeError, Encode, EncodeSink};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha3::{Digest, Sha3_256};
use std::fmt;

/// Width of a SHA3-256 digest in bytes.
pub const HASH_LEN: usize = 32;

/// Fixed-size 32-byte hash identifying blocks, bodies, and interlinks.
///
/// `Copy` on purpose: hashes are compared and passed constantly during block
/// validation and are cheaper on the stack than behind a pointer. Equality is
/// byte-wise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub struct Hash(pub [u8; HASH_LEN]);

impl Hash {
    /// Creates the all-zero hash, the predecessor sentinel of genesis.
    pub const fn zero() -> Hash {
        Hash([0u8; HASH_LEN])
    }

    /// The digest as a byte slice.
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Creates a hash from a slice of exactly [`HASH_LEN`] bytes.
    pub fn from_slice(slice: &[u8]) -> Option<Hash> {
        <[u8; HASH_LEN]>::try_from(slice).ok().map(Hash)
    }

    /// Computes the hash of a record's canonical serialization.
    ///
    /// The record is streamed straight into the digest; no intermediate
    /// buffer is allocated.
    pub fn of<T: Encode>(value: &T) -> Hash {
        let mut builder = Hash::sha3();
        value.encode(&mut builder);
        builder.finalize()
    }

    /// Opens an incremental SHA3-256 digest.
    pub fn sha3() -> HashBuilder {
        HashBuilder::new()
    }

    /// Renders the hash in standard base64.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Parses a hash from standard base64.
    ///
    /// Returns `None` if the input is not base64 or does not decode to
    /// exactly [`HASH_LEN`] bytes.
    pub fn from_base64(s: &str) -> Option<Hash> {
        let bytes = BASE64.decode(s).ok()?;
        Hash::from_slice(&bytes)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}

impl Encode for Hash {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&self.0);
    }
}

impl Decode for Hash {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        Hash::from_slice(take(input, HASH_LEN)?).ok_or(DecodeError::InvalidValue)
    }
}

/// Incremental SHA3-256 digest.
///
/// Implements [`EncodeSink`] so encodable records hash without intermediate
/// byte buffers.
pub struct HashBuilder {
    digest: Sha3_256,
}

impl HashBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            digest: Sha3_256::new(),
        }
    }

    /// Feeds data into the digest.
    pub fn update(&mut self, data: &[u8]) {
        self.digest.update(data);
    }

    /// Closes the digest and returns the hash.
    pub fn finalize(self) -> Hash {
        Hash(self.digest.finalize().into())
    }
}

impl Default for HashBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeSink for HashBuilder {
    fn write(&mut self, bytes: &[u8]) {
        self.digest.update(bytes);
    }
}
