//! Shared byte buffer for encoded records.

use std::ops::Deref;
use std::sync::Arc;

/// Byte buffer that clones by bumping a reference count.
///
/// Encoded blocks get handed to several consumers at once (hashing, network
/// send, storage), so the payload sits behind an `Arc` and stays put.
/// Writing through a shared buffer first detaches a private copy.
#[derive(Debug, Default, Eq, PartialEq)]
pub struct Bytes {
    data: Arc<Vec<u8>>,
}

impl Bytes {
    /// Wraps the given bytes in a buffer.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Arc::new(data.into()),
        }
    }

    /// Creates an empty buffer able to hold `cap` bytes without growing.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            data: Arc::new(Vec::with_capacity(cap)),
        }
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no bytes are held.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The held bytes as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Detached copy of the held bytes.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.as_ref().clone()
    }

    /// Capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Appends bytes, detaching a private copy first if the buffer is
    /// currently shared.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        Arc::make_mut(&mut self.data).extend_from_slice(bytes);
    }
}

impl Clone for Bytes {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl Deref for Bytes {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_storage() {
        let a = Bytes::new(vec![1u8, 2, 3]);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.as_slice().as_ptr(), b.as_slice().as_ptr());
    }

    #[test]
    fn writing_through_a_shared_buffer_detaches_it() {
        let a = Bytes::new(vec![1u8, 2, 3]);
        let mut b = a.clone();
        b.extend_from_slice(&[4]);
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(b.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn to_vec_copies_out() {
        let buffer = Bytes::new(vec![9u8, 8]);
        let mut copied = buffer.to_vec();
        copied.push(7);
        assert_eq!(copied, vec![9, 8, 7]);
        assert_eq!(buffer.as_slice(), &[9, 8]);
    }
}
