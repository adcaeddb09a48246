use std::fmt;
use std::str::FromStr;

use crate::hex;
use crate::{HashAlgorithm, HashError};

/// The content hash identifying a stored object.
///
/// Ordering compares raw digest bytes, which for ids of one algorithm is the
/// same as comparing their lowercase hex strings. Everything that iterates
/// commits in a reproducible order relies on this.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectId {
    Sha1([u8; 20]),
    Sha256([u8; 32]),
}

impl ObjectId {
    /// Build an id from a raw digest.
    pub fn from_bytes(bytes: &[u8], algo: HashAlgorithm) -> Result<Self, HashError> {
        let expected = algo.digest_len();
        if bytes.len() != expected {
            return Err(HashError::InvalidDigestLength {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(match algo {
            HashAlgorithm::Sha1 => {
                let mut arr = [0u8; 20];
                arr.copy_from_slice(bytes);
                Self::Sha1(arr)
            }
            HashAlgorithm::Sha256 => {
                let mut arr = [0u8; 32];
                arr.copy_from_slice(bytes);
                Self::Sha256(arr)
            }
        })
    }

    /// Parse a full-length hex id. 40 digits is SHA-1, 64 is SHA-256.
    pub fn from_hex(s: &str) -> Result<Self, HashError> {
        match HashAlgorithm::from_hex_len(s.len()) {
            Some(HashAlgorithm::Sha1) => {
                let mut bytes = [0u8; 20];
                hex::decode_into(s, &mut bytes)?;
                Ok(Self::Sha1(bytes))
            }
            Some(HashAlgorithm::Sha256) => {
                let mut bytes = [0u8; 32];
                hex::decode_into(s, &mut bytes)?;
                Ok(Self::Sha256(bytes))
            }
            None => Err(HashError::InvalidHexLength { actual: s.len() }),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Sha1(b) => b,
            Self::Sha256(b) => b,
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Sha1(_) => HashAlgorithm::Sha1,
            Self::Sha256(_) => HashAlgorithm::Sha256,
        }
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Path of the loose object relative to the objects directory:
    /// the first two hex digits name the fan-out directory, the rest the file.
    pub fn loose_path(&self) -> String {
        let hex = self.to_hex();
        format!("{}/{}", &hex[..2], &hex[2..])
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..8])
    }
}

impl FromStr for ObjectId {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
