//! Binary encoding and decoding traits for the consensus wire format.
//!
//! Every persisted or transmitted record goes through this framework. The
//! format is deterministic and position-based:
//!
//! - Integers: big-endian, fixed-width
//! - `bool`: single byte (0 = false, 1 = true)
//! - `String`: 1-byte length prefix (0..=255) followed by UTF-8 bytes
//! - Fixed-width records (hashes, addresses, signatures): raw bytes
//!
//! The encoded size of a record always equals `serialized_size()`, which is
//! computed by a counting pass so `to_bytes` can allocate exactly once.

use crate::types::bytes::Bytes;
use lightchain_derive::Error;

/// Maximum byte length of a length-prefixed string.
pub const VAR_STRING_MAX_LEN: usize = 255;

/// Destination for encoded bytes.
///
/// Byte buffers and the hash builder both implement this, so records can be
/// hashed straight out of `encode` with no staging buffer.
pub trait EncodeSink {
    /// Appends `bytes` to the sink.
    fn write(&mut self, bytes: &[u8]);
}

/// Sink that measures instead of storing.
pub struct SizeCounter(usize);

impl SizeCounter {
    /// Starts a fresh count.
    pub fn new() -> Self {
        SizeCounter(0)
    }

    /// Bytes counted so far.
    pub fn len(&self) -> usize {
        self.0
    }
}

impl Default for SizeCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodeSink for SizeCounter {
    fn write(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }
}

impl EncodeSink for Bytes {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl EncodeSink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Trait for types with a canonical binary representation.
pub trait Encode {
    /// Streams the wire form of `self` into `out`.
    fn encode<S: EncodeSink>(&self, out: &mut S);

    /// Returns the exact number of bytes `encode` writes.
    fn serialized_size(&self) -> usize {
        let mut counter = SizeCounter::new();
        self.encode(&mut counter);
        counter.len()
    }

    /// Encodes into a buffer sized by a counting pass, so it never regrows.
    fn to_bytes(&self) -> Bytes {
        let mut out = Bytes::with_capacity(self.serialized_size());
        self.encode(&mut out);
        out
    }
}

/// Ways a parse can fail.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input ended before the value was complete.
    #[error("input truncated")]
    Truncated,
    /// A length-prefixed string held bytes that are not valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    /// Bytes do not represent a valid value for the target type.
    #[error("invalid value for target type")]
    InvalidValue,
}

/// Trait for types that can be reconstructed from their binary representation.
pub trait Decode: Sized {
    /// Decodes one value off the front of `input`, leaving the cursor on
    /// the first byte it did not consume.
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError>;

    /// Decodes a value that must account for the whole slice; leftover
    /// bytes fail the parse.
    fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        let mut cursor = data;
        let value = Self::decode(&mut cursor)?;

        if cursor.is_empty() {
            Ok(value)
        } else {
            Err(DecodeError::InvalidValue)
        }
    }
}

/// Splits `n` bytes off the front of the cursor.
pub(crate) fn take<'a>(input: &mut &'a [u8], n: usize) -> Result<&'a [u8], DecodeError> {
    if n > input.len() {
        return Err(DecodeError::Truncated);
    }
    let (head, tail) = input.split_at(n);
    *input = tail;
    Ok(head)
}

// u8
impl Encode for u8 {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&[*self]);
    }
}

impl Decode for u8 {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(take(input, 1)?[0])
    }
}

// Wider integers, big-endian
macro_rules! impl_be_int {
    ($($t:ty => $width:literal),* $(,)?) => {
        $(
            impl Encode for $t {
                fn encode<S: EncodeSink>(&self, out: &mut S) {
                    out.write(&self.to_be_bytes());
                }
            }

            impl Decode for $t {
                fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
                    let mut raw = [0u8; $width];
                    raw.copy_from_slice(take(input, $width)?);
                    Ok(<$t>::from_be_bytes(raw))
                }
            }
        )*
    };
}

impl_be_int!(u16 => 2, u32 => 4, u64 => 8);

// bool
impl Encode for bool {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&[*self as u8]);
    }
}

impl Decode for bool {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let byte = u8::decode(input)?;
        if byte > 1 {
            return Err(DecodeError::InvalidValue);
        }
        Ok(byte == 1)
    }
}

// String: 1-byte length prefix, then UTF-8 bytes. Callers keep strings within
// VAR_STRING_MAX_LEN; records validate at construction.
impl Encode for String {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        debug_assert!(self.len() <= VAR_STRING_MAX_LEN);
        out.write(&[self.len() as u8]);
        out.write(self.as_bytes());
    }
}

impl Decode for String {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let len = u8::decode(input)? as usize;
        let bytes = take(input, len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }
}
