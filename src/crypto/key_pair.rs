//! Schnorr key pairs on secp256k1 with an encrypted lock lifecycle.
//!
//! A [`KeyPair`] starts unlocked. `lock` encrypts the private key under a
//! passphrase (Argon2id key derivation, XChaCha20-Poly1305 sealing) and
//! discards the cleartext; `unlock` restores it when the passphrase matches;
//! `relock` re-seals without asking for the passphrase again. Instances are
//! not thread-safe; callers serialize access.

use crate::types::address::{Address, ADDRESS_LEN};
use crate::types::encoding::{take, Decode, DecodeError, Encode, EncodeSink};
use crate::types::signature::SerializableSignature;
use argon2::Argon2;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305,
};
use k256::schnorr::signature::{Signer, Verifier};
use k256::schnorr::{SigningKey, VerifyingKey};
use lightchain_derive::Error;
use rand_core::{OsRng, RngCore};
use sha3::{Digest, Sha3_256};
use zeroize::Zeroizing;

/// Argon2id salt size in bytes.
const SALT_LEN: usize = 32;

/// XChaCha20-Poly1305 extended nonce size in bytes.
const NONCE_LEN: usize = 24;

/// Length of the sealed private key: 32 scalar bytes plus the 16-byte tag.
const SEALED_LEN: usize = 48;

/// Private key for signing.
///
/// Generated from OS entropy. The scalar leaves this module only through the
/// key-pair serialization of an unlocked pair.
#[derive(Clone)]
pub struct PrivateKey {
    key: SigningKey,
}

/// Verifying half of a key pair, with the account address it maps to.
///
/// The address rides along so validation never recomputes it. `Copy` on
/// purpose: public keys are compared and passed constantly during block
/// validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub key: VerifyingKey,
    pub address: Address,
}

impl PrivateKey {
    /// Draws a fresh private key from the operating system's entropy.
    pub fn new() -> Self {
        Self {
            key: SigningKey::random(&mut OsRng),
        }
    }

    /// Creates a private key from raw scalar bytes.
    ///
    /// Returns `None` if the bytes are not a valid secp256k1 scalar.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        let key = SigningKey::from_bytes(bytes).ok()?;
        Some(Self { key })
    }

    /// Returns the raw scalar bytes. Callers zeroize after use.
    fn to_bytes(&self) -> [u8; 32] {
        self.key.to_bytes().into()
    }

    /// Returns the matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::new(self)
    }

    /// Produces a Schnorr signature over `data`.
    pub fn sign(&self, data: &[u8]) -> SerializableSignature {
        SerializableSignature(self.key.sign(data))
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicKey {
    /// Builds the public half of a private key, address included.
    pub(crate) fn new(private: &PrivateKey) -> Self {
        let key = *private.key.verifying_key();

        PublicKey {
            key,
            address: derive_address(&key),
        }
    }

    /// Returns the 32-byte x-only encoding of the verifying key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.key.to_bytes().into()
    }

    /// Checks a Schnorr signature over `data`.
    pub fn verify(&self, data: &[u8], signature: SerializableSignature) -> bool {
        self.key.verify(data, &signature.0).is_ok()
    }
}

/// Address derivation: the last [`ADDRESS_LEN`] bytes of
/// SHA3-256(verifying key).
fn derive_address(vk: &VerifyingKey) -> Address {
    let digest: [u8; 32] = Sha3_256::digest(vk.to_bytes()).into();

    let mut addr = [0u8; ADDRESS_LEN];
    addr.copy_from_slice(&digest[32 - ADDRESS_LEN..]);
    Address(addr)
}

impl Encode for PublicKey {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&self.key.to_bytes());
    }
}

impl Decode for PublicKey {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let key_bytes = take(input, 32)?;
        let key = VerifyingKey::from_bytes(key_bytes).map_err(|_| DecodeError::InvalidValue)?;
        let address = derive_address(&key);

        Ok(PublicKey { key, address })
    }
}

/// Errors from the key-pair lock lifecycle.
#[derive(Debug, Error)]
pub enum KeyPairError {
    #[error("private key is locked")]
    Locked,

    #[error("wrong unlock key")]
    WrongKey,

    #[error("key pair has never been locked")]
    NeverLocked,

    #[error("key sealing failed")]
    Crypto,
}

/// Encrypted private key plus the parameters needed to open it again.
#[derive(Clone)]
struct SealedKey {
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
    ciphertext: [u8; SEALED_LEN],
}

/// Lock state of a key pair. An unlocked pair that has been locked before
/// keeps its seal so `relock` works without the passphrase.
#[derive(Clone)]
enum Secret {
    Unlocked {
        private: PrivateKey,
        sealed: Option<SealedKey>,
    },
    Locked(SealedKey),
}

/// A public/private key pair whose private half can be sealed at rest.
#[derive(Clone)]
pub struct KeyPair {
    public_key: PublicKey,
    secret: Secret,
}

impl KeyPair {
    /// Generates a fresh, unlocked key pair.
    pub fn generate() -> Self {
        Self::from_private_key(PrivateKey::new())
    }

    /// Wraps an existing private key into an unlocked pair.
    pub fn from_private_key(private: PrivateKey) -> Self {
        Self {
            public_key: private.public_key(),
            secret: Secret::Unlocked {
                private,
                sealed: None,
            },
        }
    }

    /// Returns the public key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Returns true while the private key is sealed.
    pub fn is_locked(&self) -> bool {
        matches!(self.secret, Secret::Locked(_))
    }

    /// Returns the private key, or fails while the pair is locked.
    pub fn private_key(&self) -> Result<&PrivateKey, KeyPairError> {
        match &self.secret {
            Secret::Unlocked { private, .. } => Ok(private),
            Secret::Locked(_) => Err(KeyPairError::Locked),
        }
    }

    /// Seals the private key under the given passphrase and discards the
    /// cleartext. Fails if the pair is already locked.
    pub fn lock(&mut self, passphrase: &[u8]) -> Result<(), KeyPairError> {
        let private = match &self.secret {
            Secret::Unlocked { private, .. } => private,
            Secret::Locked(_) => return Err(KeyPairError::Locked),
        };

        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut nonce);

        let derived = derive_key(passphrase, &salt)?;
        let cipher = XChaCha20Poly1305::new(derived.as_ref().into());

        let plaintext = Zeroizing::new(private.to_bytes());
        let sealed = cipher
            .encrypt(nonce.as_ref().into(), plaintext.as_ref())
            .map_err(|_| KeyPairError::Crypto)?;
        if sealed.len() != SEALED_LEN {
            return Err(KeyPairError::Crypto);
        }
        let mut ciphertext = [0u8; SEALED_LEN];
        ciphertext.copy_from_slice(&sealed);

        self.secret = Secret::Locked(SealedKey {
            salt,
            nonce,
            ciphertext,
        });
        Ok(())
    }

    /// Restores the private key from the seal.
    ///
    /// On a passphrase mismatch the pair stays locked and `WrongKey` is
    /// reported. Unlocking an already-unlocked pair is a no-op.
    pub fn unlock(&mut self, passphrase: &[u8]) -> Result<(), KeyPairError> {
        let sealed = match &self.secret {
            Secret::Unlocked { .. } => return Ok(()),
            Secret::Locked(sealed) => sealed.clone(),
        };

        let derived = derive_key(passphrase, &sealed.salt)?;
        let cipher = XChaCha20Poly1305::new(derived.as_ref().into());

        let plaintext = Zeroizing::new(
            cipher
                .decrypt(sealed.nonce.as_slice().into(), sealed.ciphertext.as_ref())
                .map_err(|_| KeyPairError::WrongKey)?,
        );
        if plaintext.len() != 32 {
            return Err(KeyPairError::WrongKey);
        }

        let mut scalar = Zeroizing::new([0u8; 32]);
        scalar.copy_from_slice(&plaintext);
        let private = PrivateKey::from_bytes(&scalar).ok_or(KeyPairError::WrongKey)?;

        self.secret = Secret::Unlocked {
            private,
            sealed: Some(sealed),
        };
        Ok(())
    }

    /// Re-seals the private key under the passphrase last used with `lock`,
    /// without requiring it again. Fails if the pair was never locked.
    pub fn relock(&mut self) -> Result<(), KeyPairError> {
        let sealed = match &self.secret {
            Secret::Locked(_) => return Ok(()),
            Secret::Unlocked {
                sealed: Some(sealed),
                ..
            } => sealed.clone(),
            Secret::Unlocked { sealed: None, .. } => return Err(KeyPairError::NeverLocked),
        };
        self.secret = Secret::Locked(sealed);
        Ok(())
    }
}

/// Stretches a passphrase into a 32-byte sealing key with Argon2id.
fn derive_key(passphrase: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; 32]>, KeyPairError> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(passphrase, salt, key.as_mut())
        .map_err(|_| KeyPairError::Crypto)?;
    Ok(key)
}

// Wire format: public key (32), lock flag (1), then either the raw scalar
// (unlocked) or salt || nonce || ciphertext (locked). The retained seal of an
// unlocked pair is not persisted; relock capability does not survive a
// round trip.
impl Encode for KeyPair {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        self.public_key.encode(out);
        self.is_locked().encode(out);
        match &self.secret {
            Secret::Unlocked { private, .. } => {
                out.write(&private.to_bytes());
            }
            Secret::Locked(sealed) => {
                out.write(&sealed.salt);
                out.write(&sealed.nonce);
                out.write(&sealed.ciphertext);
            }
        }
    }
}

impl Decode for KeyPair {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let public_key = PublicKey::decode(input)?;
        let locked = bool::decode(input)?;

        let secret = if locked {
            Secret::Locked(SealedKey {
                salt: read_array(input)?,
                nonce: read_array(input)?,
                ciphertext: read_array(input)?,
            })
        } else {
            let scalar: Zeroizing<[u8; 32]> = Zeroizing::new(read_array(input)?);
            let private = PrivateKey::from_bytes(&scalar).ok_or(DecodeError::InvalidValue)?;
            Secret::Unlocked {
                private,
                sealed: None,
            }
        };

        Ok(KeyPair { public_key, secret })
    }
}

fn read_array<const N: usize>(input: &mut &[u8]) -> Result<[u8; N], DecodeError> {
    <[u8; N]>::try_from(take(input, N)?).map_err(|_| DecodeError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::encoding::{Decode, Encode};

    #[test]
    fn sign_verify_roundtrip() {
        let private = PrivateKey::new();
        let public = private.public_key();

        let data = b"Hello World";
        let signature = private.sign(data);
        assert!(public.verify(data, signature));
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let private = PrivateKey::new();
        let public = private.public_key();
        let other = PrivateKey::new();

        let data = b"Hello World";
        assert!(!public.verify(data, other.sign(data)));
    }

    #[test]
    fn tampered_data_is_rejected() {
        let private = PrivateKey::new();
        let public = private.public_key();

        let signature = private.sign(b"Hello World");
        assert!(!public.verify(b"Hello World!", signature));
    }

    #[test]
    fn address_derivation_is_deterministic() {
        let private = PrivateKey::new();
        assert_eq!(private.public_key().address, private.public_key().address);
    }

    #[test]
    fn addresses_differ_between_keys() {
        assert_ne!(
            PrivateKey::new().public_key().address,
            PrivateKey::new().public_key().address
        );
    }

    #[test]
    fn public_key_codec_roundtrip() {
        let public = PrivateKey::new().public_key();
        let bytes = public.to_bytes().to_vec();
        let mut input = bytes.as_slice();
        let decoded = PublicKey::decode(&mut input).unwrap();
        assert_eq!(decoded, public);
        assert_eq!(decoded.address, public.address);
    }

    #[test]
    fn from_bytes_rejects_zero_scalar() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_none());
    }

    #[test]
    fn derive_key_is_deterministic() {
        let salt = [0xABu8; SALT_LEN];
        let a = derive_key(b"passphrase", &salt).unwrap();
        let b = derive_key(b"passphrase", &salt).unwrap();
        assert_eq!(a.as_ref(), b.as_ref());
    }

    #[test]
    fn derive_key_depends_on_salt_and_passphrase() {
        let a = derive_key(b"passphrase", &[0xAAu8; SALT_LEN]).unwrap();
        let b = derive_key(b"passphrase", &[0xBBu8; SALT_LEN]).unwrap();
        let c = derive_key(b"different", &[0xAAu8; SALT_LEN]).unwrap();
        assert_ne!(a.as_ref(), b.as_ref());
        assert_ne!(a.as_ref(), c.as_ref());
    }

    // ───────────────────────── lock lifecycle ─────────────────────────

    #[test]
    fn starts_unlocked() {
        let pair = KeyPair::generate();
        assert!(!pair.is_locked());
        assert!(pair.private_key().is_ok());
    }

    #[test]
    fn lock_blocks_private_key_access() {
        let mut pair = KeyPair::generate();
        pair.lock(b"passphrase").unwrap();

        assert!(pair.is_locked());
        assert!(matches!(pair.private_key(), Err(KeyPairError::Locked)));
    }

    #[test]
    fn lock_while_locked_fails() {
        let mut pair = KeyPair::generate();
        pair.lock(b"passphrase").unwrap();
        assert!(matches!(
            pair.lock(b"passphrase"),
            Err(KeyPairError::Locked)
        ));
    }

    #[test]
    fn unlock_restores_the_private_key() {
        let mut pair = KeyPair::generate();
        let scalar = pair.private_key().unwrap().to_bytes();

        pair.lock(b"passphrase").unwrap();
        pair.unlock(b"passphrase").unwrap();

        assert!(!pair.is_locked());
        assert_eq!(pair.private_key().unwrap().to_bytes(), scalar);
    }

    #[test]
    fn wrong_passphrase_fails_and_stays_locked() {
        let mut pair = KeyPair::generate();
        let scalar = pair.private_key().unwrap().to_bytes();

        pair.lock(&[1, 2, 3, 4]).unwrap();

        assert!(matches!(
            pair.unlock(&[1, 2, 3, 3]),
            Err(KeyPairError::WrongKey)
        ));
        assert!(pair.is_locked());

        pair.unlock(&[1, 2, 3, 4]).unwrap();
        assert_eq!(pair.private_key().unwrap().to_bytes(), scalar);
    }

    #[test]
    fn unlock_while_unlocked_is_a_noop() {
        let mut pair = KeyPair::generate();
        assert!(pair.unlock(b"anything").is_ok());
        assert!(!pair.is_locked());
    }

    #[test]
    fn relock_reseals_without_the_passphrase() {
        let mut pair = KeyPair::generate();
        pair.lock(b"passphrase").unwrap();
        pair.unlock(b"passphrase").unwrap();

        pair.relock().unwrap();
        assert!(pair.is_locked());
        assert!(matches!(pair.private_key(), Err(KeyPairError::Locked)));

        // The original passphrase still opens the re-applied seal.
        pair.unlock(b"passphrase").unwrap();
        assert!(!pair.is_locked());
    }

    #[test]
    fn relock_without_prior_lock_fails() {
        let mut pair = KeyPair::generate();
        assert!(matches!(pair.relock(), Err(KeyPairError::NeverLocked)));
    }

    // ───────────────────────── serialization ─────────────────────────

    #[test]
    fn unlocked_codec_roundtrip() {
        let pair = KeyPair::generate();
        let bytes = pair.to_bytes();
        assert_eq!(bytes.len(), pair.serialized_size());

        let decoded = KeyPair::from_bytes(&bytes).unwrap();
        assert!(!decoded.is_locked());
        assert_eq!(decoded.public_key(), pair.public_key());
        assert_eq!(
            decoded.private_key().unwrap().to_bytes(),
            pair.private_key().unwrap().to_bytes()
        );
    }

    #[test]
    fn locked_codec_roundtrip_preserves_the_seal() {
        let mut pair = KeyPair::generate();
        let scalar = pair.private_key().unwrap().to_bytes();
        pair.lock(b"passphrase").unwrap();

        let bytes = pair.to_bytes();
        let mut decoded = KeyPair::from_bytes(&bytes).unwrap();

        assert!(decoded.is_locked());
        assert_eq!(decoded.public_key(), pair.public_key());

        decoded.unlock(b"passphrase").unwrap();
        assert_eq!(decoded.private_key().unwrap().to_bytes(), scalar);
    }

    #[test]
    fn decode_rejects_invalid_scalar() {
        let pair = KeyPair::generate();
        let mut bytes = pair.to_bytes().to_vec();
        // Zero out the scalar of the unlocked payload.
        let scalar_offset = bytes.len() - 32;
        bytes[scalar_offset..].fill(0);
        assert!(KeyPair::from_bytes(&bytes).is_err());
    }
}
