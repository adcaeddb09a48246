//! Loose object storage.
//!
//! Each loose object lives at `objects/XX/YYYY...` where `XX` is the first
//! two hex digits of its id and `YYYY...` the rest. The file holds the
//! zlib-compressed bytes `"<type> <size>\0<content>"`.

mod read;
mod write;

use std::path::{Path, PathBuf};

use topo_hash::{HashAlgorithm, ObjectId};

/// Handle on an `objects/` directory.
pub struct LooseObjectStore {
    objects_dir: PathBuf,
    hash_algo: HashAlgorithm,
    compression_level: flate2::Compression,
    /// Re-hash every decoded object and compare against its id.
    verify: bool,
}

impl LooseObjectStore {
    pub fn open(objects_dir: impl AsRef<Path>, hash_algo: HashAlgorithm) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
            hash_algo,
            compression_level: flate2::Compression::default(),
            verify: false,
        }
    }

    /// Set the zlib level (0–9) used by [`write_raw`](Self::write_raw).
    pub fn set_compression_level(&mut self, level: u32) {
        self.compression_level = flate2::Compression::new(level);
    }

    /// Enable or disable content verification on read.
    pub fn set_verify(&mut self, verify: bool) {
        self.verify = verify;
    }

    pub fn hash_algo(&self) -> HashAlgorithm {
        self.hash_algo
    }

    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// File path of the object named `oid`.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }
}

/// Errors from loose object operations.
#[derive(Debug, thiserror::Error)]
pub enum LooseError {
    #[error("object {oid} not found at {}", path.display())]
    Missing { oid: ObjectId, path: PathBuf },

    #[error("decompression error for {oid}: {source}")]
    Decompress {
        oid: ObjectId,
        #[source]
        source: std::io::Error,
    },

    #[error("object {oid} is not valid UTF-8 text")]
    NotUtf8 { oid: ObjectId },

    #[error("object {oid} is a {actual}, not a commit")]
    NotACommit {
        oid: ObjectId,
        actual: topo_object::ObjectType,
    },

    #[error("hash mismatch for {}: expected {expected}, got {actual}", path.display())]
    HashMismatch {
        path: PathBuf,
        expected: ObjectId,
        actual: ObjectId,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("object parse error: {0}")]
    Object(#[from] topo_object::ObjectError),
}
