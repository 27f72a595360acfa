//! Cryptographic key material and the key-pair lock lifecycle.

pub mod key_pair;
