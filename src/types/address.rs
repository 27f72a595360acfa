//! 20-byte account addresses derived from public keys.

use crate::types::encoding::{take, Decode, DecodeError, Encode, EncodeSink};
use std::fmt;

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Fixed-size 20-byte address identifying an account.
///
/// Derived from a public key by hashing the verifying key with SHA3-256 and
/// keeping the last 20 bytes. Equality is byte-wise. `Copy` for the same
/// reason as [`crate::types::hash::Hash`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The address as a byte slice.
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}

impl Encode for Address {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&self.0);
    }
}

impl Decode for Address {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let raw = take(input, ADDRESS_LEN)?;
        <[u8; ADDRESS_LEN]>::try_from(raw)
            .map(Address)
            .map_err(|_| DecodeError::InvalidValue)
    }
}
