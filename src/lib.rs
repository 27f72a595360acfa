//! Proof-of-work block validation core.
//!
//! Provides the self-verifying block aggregate (header, interlink, body), the
//! difficulty-aware interlink construction used for succinct proofs of work,
//! the canonical wire serialization shared by every consensus record, and the
//! key-pair lock lifecycle. Chain selection, storage, and peer I/O live in the
//! surrounding node, not here.

pub mod core;
pub mod crypto;
pub mod network;
pub mod types;
pub mod utils;
