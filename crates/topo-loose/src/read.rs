use std::fs;
use std::io::Read;

use flate2::read::ZlibDecoder;
use topo_hash::{Hasher, ObjectId};
use topo_object::{header, ObjectType};

use crate::{LooseError, LooseObjectStore};

impl LooseObjectStore {
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Read, inflate and frame-check the object `oid`, returning its type and
    /// content text with the header stripped.
    ///
    /// A missing file is an error: every id handed in here was named by a
    /// branch or another commit, so its absence means the store is incomplete.
    pub fn decode_typed(&self, oid: &ObjectId) -> Result<(ObjectType, String), LooseError> {
        let path = self.object_path(oid);
        let compressed = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LooseError::Missing { oid: *oid, path })
            }
            Err(e) => return Err(LooseError::Io(e)),
        };
        log::debug!("inflating {} ({} bytes)", oid, compressed.len());

        let raw = inflate(&compressed, oid)?;

        if self.verify {
            let actual = Hasher::digest(self.hash_algo, &raw);
            if actual != *oid {
                return Err(LooseError::HashMismatch {
                    path,
                    expected: *oid,
                    actual,
                });
            }
        }

        let (obj_type, content) = header::split_object(&raw)?;
        let text = std::str::from_utf8(content).map_err(|_| LooseError::NotUtf8 { oid: *oid })?;
        Ok((obj_type, text.to_owned()))
    }

    /// Decoded content text of `oid`, whatever its type.
    pub fn decode(&self, oid: &ObjectId) -> Result<String, LooseError> {
        self.decode_typed(oid).map(|(_, text)| text)
    }

    /// Like [`decode`](Self::decode), but the object must be a commit.
    pub fn decode_commit(&self, oid: &ObjectId) -> Result<String, LooseError> {
        match self.decode_typed(oid)? {
            (ObjectType::Commit, text) => Ok(text),
            (actual, _) => Err(LooseError::NotACommit { oid: *oid, actual }),
        }
    }
}

fn inflate(compressed: &[u8], oid: &ObjectId) -> Result<Vec<u8>, LooseError> {
    let mut out = Vec::new();
    ZlibDecoder::new(compressed)
        .read_to_end(&mut out)
        .map_err(|e| LooseError::Decompress {
            oid: *oid,
            source: e,
        })?;
    Ok(out)
}
