//! Canonical wire form of a peer endpoint.

use lightchain_derive::BinaryCodec;

/// A peer endpoint as exchanged during address gossip.
///
/// On the wire: services (4), timestamp (8), host as a length-prefixed
/// string (1 + len), port (2), signal id (4), for `19 + len(host)` bytes
/// in total.
///
/// Equality ignores the timestamp: an address identifies a peer, not a
/// moment in time.
#[derive(Debug, Clone, BinaryCodec)]
pub struct NetAddress {
    /// Service capability bitmask advertised by the peer.
    pub services: u32,
    /// Last-seen time, seconds since the Unix epoch.
    pub timestamp: u64,
    /// Hostname or textual IP, at most 255 bytes.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Identifier used for signaling relays.
    pub signal_id: u32,
}

impl NetAddress {
    /// Creates a new address record. `host` must not exceed 255 bytes.
    pub fn new(services: u32, timestamp: u64, host: impl Into<String>, port: u16, signal_id: u32) -> Self {
        let host = host.into();
        debug_assert!(host.len() <= crate::types::encoding::VAR_STRING_MAX_LEN);
        Self {
            services,
            timestamp,
            host,
            port,
            signal_id,
        }
    }
}

impl PartialEq for NetAddress {
    fn eq(&self, other: &Self) -> bool {
        self.services == other.services
            && self.host == other.host
            && self.port == other.port
            && self.signal_id == other.signal_id
    }
}

impl Eq for NetAddress {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::encoding::{Decode, DecodeError, Encode};

    #[test]
    fn zero_address_is_nineteen_zero_bytes() {
        let address = NetAddress::new(0, 0, "", 0, 0);
        let bytes = address.to_bytes();
        assert_eq!(bytes.as_ref(), &[0u8; 19]);
        assert_eq!(NetAddress::from_bytes(&bytes).unwrap(), address);
    }

    #[test]
    fn serialized_size_is_nineteen_plus_host() {
        let address = NetAddress::new(1, 0x0102030405060708, "example.com", 8443, 42);
        assert_eq!(address.serialized_size(), 30);
        assert_eq!(address.to_bytes().len(), 30);
    }

    #[test]
    fn codec_roundtrip_preserves_every_field() {
        let address = NetAddress::new(3, 1_700_000_000, "node.example.org", 12011, 7);
        let decoded = NetAddress::from_bytes(&address.to_bytes()).unwrap();

        assert_eq!(decoded, address);
        assert_eq!(decoded.timestamp, address.timestamp);
    }

    #[test]
    fn field_order_on_the_wire() {
        let address = NetAddress::new(0x01020304, 0x1122334455667788, "ab", 0x0910, 0x0a0b0c0d);
        let bytes = address.to_bytes();

        assert_eq!(&bytes[0..4], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(&bytes[4..12], &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]);
        assert_eq!(&bytes[12..15], &[2, b'a', b'b']);
        assert_eq!(&bytes[15..17], &[0x09, 0x10]);
        assert_eq!(&bytes[17..21], &[0x0a, 0x0b, 0x0c, 0x0d]);
    }

    #[test]
    fn equality_ignores_timestamp() {
        let a = NetAddress::new(1, 100, "example.com", 8443, 42);
        let b = NetAddress::new(1, 999, "example.com", 8443, 42);
        assert_eq!(a, b);

        let c = NetAddress::new(1, 100, "example.com", 8444, 42);
        assert_ne!(a, c);
    }

    #[test]
    fn decode_fails_on_truncated_input() {
        let bytes = NetAddress::new(1, 2, "example.com", 3, 4).to_bytes();
        for cut in [0, 4, 12, 14, bytes.len() - 1] {
            assert!(NetAddress::from_bytes(&bytes[..cut]).is_err());
        }
    }

    #[test]
    fn decode_fails_on_invalid_utf8_host() {
        let mut bytes = NetAddress::new(0, 0, "ab", 0, 0).to_bytes().to_vec();
        bytes[13] = 0xFF;
        bytes[14] = 0xFE;
        assert_eq!(
            NetAddress::from_bytes(&bytes),
            Err(DecodeError::InvalidUtf8)
        );
    }
}
