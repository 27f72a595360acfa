//! Schnorr signature wrapper wired into the wire codec.

use crate::types::encoding::{take, Decode, DecodeError, Encode, EncodeSink};
use k256::schnorr::Signature;

/// Signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Wrapper around a Schnorr [`Signature`] that implements the `Encode` and
/// `Decode` traits (64 raw bytes on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializableSignature(pub Signature);

impl SerializableSignature {
    pub fn new(sig: Signature) -> Self {
        SerializableSignature(sig)
    }
}

impl From<Signature> for SerializableSignature {
    fn from(sig: Signature) -> Self {
        SerializableSignature(sig)
    }
}

impl Encode for SerializableSignature {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        let bytes: [u8; SIGNATURE_LEN] = self.0.to_bytes();
        out.write(&bytes);
    }
}

impl Decode for SerializableSignature {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let raw = take(input, SIGNATURE_LEN)?;
        Signature::try_from(raw)
            .map(SerializableSignature)
            .map_err(|_| DecodeError::InvalidValue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_pair::PrivateKey;
    use crate::types::encoding::{Decode, Encode};

    #[test]
    fn codec_roundtrip() {
        let key = PrivateKey::new();
        let signature = key.sign(b"payload");

        let bytes = signature.to_bytes();
        assert_eq!(bytes.len(), SIGNATURE_LEN);
        assert_eq!(
            SerializableSignature::from_bytes(&bytes).unwrap(),
            signature
        );
    }

    #[test]
    fn decode_rejects_truncated_input() {
        assert!(SerializableSignature::from_bytes(&[0u8; 63]).is_err());
    }
}
