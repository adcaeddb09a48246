//! Streaming digests over object bytes.

use digest::Digest;

use crate::{HashAlgorithm, ObjectId};

enum Inner {
    Sha1(sha1::Sha1),
    Sha256(sha2::Sha256),
}

/// Incremental SHA-1 / SHA-256 hasher producing an [`ObjectId`].
pub struct Hasher {
    inner: Inner,
}

impl Hasher {
    pub fn new(algo: HashAlgorithm) -> Self {
        let inner = match algo {
            HashAlgorithm::Sha1 => Inner::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Sha256 => Inner::Sha256(sha2::Sha256::new()),
        };
        Self { inner }
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.inner {
            Inner::Sha1(h) => h.update(data),
            Inner::Sha256(h) => h.update(data),
        }
    }

    pub fn finalize(self) -> ObjectId {
        match self.inner {
            Inner::Sha1(h) => {
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(h.finalize().as_slice());
                ObjectId::Sha1(bytes)
            }
            Inner::Sha256(h) => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(h.finalize().as_slice());
                ObjectId::Sha256(bytes)
            }
        }
    }

    /// Hash `data` in one call.
    pub fn digest(algo: HashAlgorithm, data: &[u8]) -> ObjectId {
        let mut h = Self::new(algo);
        h.update(data);
        h.finalize()
    }

    /// Hash an object the way the store names it: `"<type> <len>\0<content>"`.
    pub fn hash_object(algo: HashAlgorithm, obj_type: &str, content: &[u8]) -> ObjectId {
        let mut h = Self::new(algo);
        h.update(format!("{} {}\0", obj_type, content.len()).as_bytes());
        h.update(content);
        h.finalize()
    }
}
